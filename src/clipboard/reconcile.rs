//! # 调色板协调策略
//!
//! ## 设计思路
//!
//! 索引色图像的像素只有在“自己的”调色板下才有意义。粘贴到调色板不同的索引色文档时，
//! 应该重映射像素还是改写目标调色板，取决于目标文档的用途，因此做成可插拔策略：
//! - `NearestColorRemap`：像素逐索引映射到目标调色板中最接近的颜色，目标调色板不变
//! - `ReplacePalette`：像素不变，目标调色板被替换为剪贴板中的调色板
//!
//! 调用方可通过 `Clipboard::set_reconciler` 安装自定义策略。

use image::{GrayImage, Rgba};

use crate::doc::{Image, Palette};
use crate::error::ClipboardError;

use super::raster;

/// 协调结果：待粘贴的像素，以及需要写回目标文档的新调色板（若有）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub image: Image,
    pub palette: Option<Palette>,
}

/// 源图像与目标文档各自的透明索引。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransparentIndices {
    pub source: u8,
    pub target: u8,
}

pub trait PaletteReconciler: Send + Sync {
    /// `image` 为索引色，`source` 是它的调色板，`target` 是目标文档当前调色板。
    ///
    /// 源透明像素必须落在 `transparent.target` 上，源不透明像素不得落在它上面。
    fn reconcile(
        &self,
        image: &Image,
        source: &Palette,
        target: &Palette,
        transparent: TransparentIndices,
    ) -> Result<Reconciled, ClipboardError>;
}

fn indexed_pixels(image: &Image) -> Result<&GrayImage, ClipboardError> {
    match image {
        Image::Indexed(pixels) => Ok(pixels),
        other => Err(ClipboardError::ColorMode(format!(
            "调色板协调需要索引色图像，实际为 {}",
            other.color_mode().as_str()
        ))),
    }
}

/// 最近色重映射。
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestColorRemap;

impl PaletteReconciler for NearestColorRemap {
    fn reconcile(
        &self,
        image: &Image,
        source: &Palette,
        target: &Palette,
        transparent: TransparentIndices,
    ) -> Result<Reconciled, ClipboardError> {
        let pixels = indexed_pixels(image)?;

        let skip = Some(transparent.target);
        let mut map = [transparent.target; 256];
        for (index, slot) in map.iter_mut().enumerate() {
            if index == transparent.source as usize {
                continue;
            }
            if let Some(color) = source.get(index) {
                *slot = target.nearest_index(color, skip).unwrap_or(transparent.target);
            }
        }

        log::debug!(
            "🎨 最近色重映射：源调色板 {} 色 -> 目标调色板 {} 色（透明索引 {} -> {}）",
            source.len(),
            target.len(),
            transparent.source,
            transparent.target
        );

        Ok(Reconciled {
            image: Image::Indexed(raster::remap_indices(pixels, &map)),
            palette: None,
        })
    }
}

/// 直接替换目标调色板。
///
/// 透明索引不同时，交换两个索引对应的调色板条目与像素，颜色保持不变。
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplacePalette;

impl PaletteReconciler for ReplacePalette {
    fn reconcile(
        &self,
        image: &Image,
        source: &Palette,
        _target: &Palette,
        transparent: TransparentIndices,
    ) -> Result<Reconciled, ClipboardError> {
        let pixels = indexed_pixels(image)?;
        log::debug!("🎨 以剪贴板调色板（{} 色）替换目标调色板", source.len());

        let (from, to) = (transparent.source, transparent.target);
        if from == to {
            return Ok(Reconciled {
                image: image.clone(),
                palette: Some(source.clone()),
            });
        }

        let mut colors = source.colors().to_vec();
        let needed = from.max(to) as usize + 1;
        if colors.len() < needed {
            colors.resize(needed, Rgba([0, 0, 0, 0]));
        }
        colors.swap(from as usize, to as usize);

        let mut map: [u8; 256] = std::array::from_fn(|index| index as u8);
        map.swap(from as usize, to as usize);

        Ok(Reconciled {
            image: Image::Indexed(raster::remap_indices(pixels, &map)),
            palette: Some(Palette::new(colors)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn sample() -> (Image, Palette, Palette) {
        let source = Palette::new(vec![
            Rgba([0, 0, 0, 0]),
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
        ]);
        let target = Palette::new(vec![
            Rgba([0, 0, 0, 0]),
            Rgba([0, 250, 0, 255]),
            Rgba([250, 0, 0, 255]),
        ]);
        let mut pixels = GrayImage::from_pixel(3, 1, Luma([0]));
        pixels.put_pixel(1, 0, Luma([1]));
        pixels.put_pixel(2, 0, Luma([2]));
        (Image::Indexed(pixels), source, target)
    }

    #[test]
    fn remap_swaps_indices_to_nearest_target_colors() {
        let (image, source, target) = sample();
        let reconciled = NearestColorRemap
            .reconcile(&image, &source, &target, TransparentIndices::default())
            .expect("indexed image");

        assert_eq!(reconciled.palette, None);
        let Image::Indexed(out) = &reconciled.image else {
            panic!("indexed expected");
        };
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(1, 0).0[0], 2);
        assert_eq!(out.get_pixel(2, 0).0[0], 1);
    }

    #[test]
    fn remap_rejects_non_indexed_image() {
        let (_, source, target) = sample();
        let rgb = Image::Rgb(image::RgbaImage::new(1, 1));
        let result =
            NearestColorRemap.reconcile(&rgb, &source, &target, TransparentIndices::default());
        assert!(matches!(result, Err(ClipboardError::ColorMode(_))));
    }

    #[test]
    fn replace_keeps_pixels_and_returns_source_palette() {
        let (image, source, target) = sample();
        let reconciled = ReplacePalette
            .reconcile(&image, &source, &target, TransparentIndices::default())
            .expect("replace never fails");

        assert_eq!(reconciled.image, image);
        assert_eq!(reconciled.palette, Some(source));
    }

    /// 源调色板：0 = 灰，1 = 红，3 = 透明。像素为 [1, 3, 0]。
    fn source_with_transparent_three() -> (Image, Palette) {
        let source = Palette::new(vec![
            Rgba([9, 9, 9, 255]),
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
            Rgba([0, 0, 0, 0]),
        ]);
        let mut pixels = GrayImage::from_pixel(3, 1, Luma([1]));
        pixels.put_pixel(1, 0, Luma([3]));
        pixels.put_pixel(2, 0, Luma([0]));
        (Image::Indexed(pixels), source)
    }

    #[test]
    fn remap_moves_source_transparency_to_target_index() {
        let (image, source) = source_with_transparent_three();
        let target = Palette::new(vec![
            Rgba([0, 0, 0, 0]),
            Rgba([10, 10, 10, 255]),
            Rgba([250, 0, 0, 255]),
        ]);
        let transparent = TransparentIndices { source: 3, target: 0 };

        let reconciled = NearestColorRemap
            .reconcile(&image, &source, &target, transparent)
            .expect("indexed image");

        let Image::Indexed(out) = &reconciled.image else {

            panic!("indexed expected");

        };
        assert_eq!(out.get_pixel(0, 0).0[0], 2);
        assert_eq!(out.get_pixel(1, 0).0[0], 0);
        assert_eq!(out.get_pixel(2, 0).0[0], 1);
    }

    #[test]
    fn remap_with_same_palette_still_fixes_transparency() {
        let (image, source) = source_with_transparent_three();
        let transparent = TransparentIndices { source: 3, target: 0 };

        let reconciled = NearestColorRemap
            .reconcile(&image, &source, &source, transparent)
            .expect("indexed image");

        let Image::Indexed(out) = &reconciled.image else {

            panic!("indexed expected");

        };
        assert_eq!(out.get_pixel(0, 0).0[0], 1);
        assert_eq!(out.get_pixel(1, 0).0[0], 0);
        assert_ne!(out.get_pixel(2, 0).0[0], 0);
    }

    #[test]
    fn replace_swaps_transparent_entries_and_pixels() {
        let (image, source) = source_with_transparent_three();
        let transparent = TransparentIndices { source: 3, target: 0 };

        let reconciled = ReplacePalette
            .reconcile(&image, &source, &Palette::default(), transparent)
            .expect("indexed image");

        let palette = reconciled.palette.expect("palette replaced");
        assert_eq!(palette.get(0), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(palette.get(3), Some(Rgba([9, 9, 9, 255])));
        let Image::Indexed(out) = &reconciled.image else {
            panic!("indexed expected");
        };
        assert_eq!(out.get_pixel(0, 0).0[0], 1);
        assert_eq!(out.get_pixel(1, 0).0[0], 0);
        assert_eq!(out.get_pixel(2, 0).0[0], 3);
    }
}

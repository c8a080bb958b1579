//! # 快照类型
//!
//! ## 设计思路
//!
//! 四种内容（无 / 图像 / 调色板条目 / 文档范围）用一个和类型 `ClipboardContent` 表示，
//! 每个分支自带校验与深拷贝逻辑，格式标签由分支推导。
//!
//! ## 实现思路
//!
//! - 快照只能通过 `capture` 构造：先校验，全部通过后才深拷贝。
//!   校验失败时不产生任何快照，存储保持原状。
//! - 字段全部私有，只提供只读访问，快照构造后不可变。

use crate::doc::{Cel, ColorMode, DocRange, Image, LayerId, Mask, Palette, PalettePicks};
use crate::error::ClipboardError;

use super::ClipboardFormat;

/// 图像快照：像素、可选蒙版、可选调色板的独立副本。
///
/// 索引色像素只有配合捕获时的透明索引才能正确解释，因此一并保存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSnapshot {
    image: Image,
    mask: Option<Mask>,
    palette: Option<Palette>,
    transparent_index: u8,
}

impl ImageSnapshot {
    pub(crate) fn capture(
        image: &Image,
        mask: Option<&Mask>,
        palette: Option<&Palette>,
        transparent_index: u8,
    ) -> Result<Self, ClipboardError> {
        let size = image.size();
        if size.is_empty() {
            return Err(ClipboardError::InvalidRegion(format!(
                "图像尺寸为空：{}x{}",
                size.width, size.height
            )));
        }

        if let Some(mask) = mask {
            let mask_size = mask.size();
            if !size.contains(mask_size) {
                return Err(ClipboardError::InvalidRegion(format!(
                    "蒙版 {}x{} 超出图像 {}x{}",
                    mask_size.width, mask_size.height, size.width, size.height
                )));
            }
        }

        Ok(Self {
            image: image.clone(),
            mask: mask.cloned(),
            palette: palette.cloned(),
            transparent_index,
        })
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn transparent_index(&self) -> u8 {
        self.transparent_index
    }
}

/// 调色板快照：调色板副本与捕获时的选中索引。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSnapshot {
    palette: Palette,
    picks: PalettePicks,
}

impl PaletteSnapshot {
    pub(crate) fn capture(palette: &Palette, picks: &PalettePicks) -> Result<Self, ClipboardError> {
        if let Some(index) = picks.first_out_of_bounds(palette.len()) {
            return Err(ClipboardError::InvalidIndex {
                index,
                len: palette.len(),
            });
        }

        Ok(Self {
            palette: palette.clone(),
            picks: picks.clone(),
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn picks(&self) -> &PalettePicks {
        &self.picks
    }
}

/// 文档范围快照：矩形 (图层, 帧) 网格中每个 cel 的独立副本。
///
/// `cels` 按图层优先排列：第 `l` 个图层、第 `f` 帧位于 `l * frames + f`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSnapshot {
    range: DocRange,
    cels: Vec<Option<Cel>>,
    color_mode: ColorMode,
    palette: Palette,
    transparent_index: u8,
}

impl RangeSnapshot {
    pub(crate) fn new(
        range: DocRange,
        cels: Vec<Option<Cel>>,
        color_mode: ColorMode,
        palette: Palette,
        transparent_index: u8,
    ) -> Result<Self, ClipboardError> {
        if range.is_empty() {
            return Err(ClipboardError::EmptyRange);
        }
        if cels.len() != range.cel_count() {
            return Err(ClipboardError::InvalidRegion(format!(
                "cel 数量 {} 与选区网格 {}x{} 不一致",
                cels.len(),
                range.layers.len(),
                range.frames.len()
            )));
        }

        Ok(Self {
            range,
            cels,
            color_mode,
            palette,
            transparent_index,
        })
    }

    pub fn range(&self) -> &DocRange {
        &self.range
    }

    pub fn layers(&self) -> &[LayerId] {
        &self.range.layers
    }

    pub fn frames(&self) -> &[usize] {
        &self.range.frames
    }

    pub fn layer_count(&self) -> usize {
        self.range.layers.len()
    }

    pub fn frame_count(&self) -> usize {
        self.range.frames.len()
    }

    /// 网格中第 `layer` 行、第 `frame` 列的 cel（均为网格内的相对序号）。
    pub fn cel(&self, layer: usize, frame: usize) -> Option<&Cel> {
        if layer >= self.layer_count() || frame >= self.frame_count() {
            return None;
        }
        self.cels[layer * self.frame_count() + frame].as_ref()
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn transparent_index(&self) -> u8 {
        self.transparent_index
    }
}

/// 剪贴板中的内容。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClipboardContent {
    #[default]
    None,
    Image(ImageSnapshot),
    DocumentRange(RangeSnapshot),
    PaletteEntries(PaletteSnapshot),
}

impl ClipboardContent {
    pub fn format(&self) -> ClipboardFormat {
        match self {
            Self::None => ClipboardFormat::None,
            Self::Image(_) => ClipboardFormat::Image,
            Self::DocumentRange(_) => ClipboardFormat::DocumentRange,
            Self::PaletteEntries(_) => ClipboardFormat::PaletteEntries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Point, RangeKind, Rect, Size};
    use image::Rgba;

    fn rgb_image(width: u32, height: u32) -> Image {
        Image::blank(ColorMode::Rgb, Size::new(width, height), 0)
    }

    #[test]
    fn image_capture_rejects_mask_larger_than_image() {
        let image = rgb_image(4, 4);
        let mask = Mask::from_rect(Rect::new(0, 0, 5, 2));
        let result = ImageSnapshot::capture(&image, Some(&mask), None, 0);
        assert!(matches!(result, Err(ClipboardError::InvalidRegion(_))));
    }

    #[test]
    fn image_capture_rejects_empty_image() {
        let image = rgb_image(0, 3);
        let result = ImageSnapshot::capture(&image, None, None, 0);
        assert!(matches!(result, Err(ClipboardError::InvalidRegion(_))));
    }

    #[test]
    fn image_capture_accepts_mask_at_any_origin() {
        let image = rgb_image(4, 4);
        let mask = Mask::from_rect(Rect::new(-7, 30, 4, 4));
        let snapshot = ImageSnapshot::capture(&image, Some(&mask), None, 0).expect("capture");
        assert_eq!(snapshot.mask().map(Mask::origin), Some(Point::new(-7, 30)));
    }

    #[test]
    fn palette_capture_reports_offending_index() {
        let palette = Palette::new(vec![Rgba([0, 0, 0, 255]); 4]);
        let picks: PalettePicks = [1, 4].into_iter().collect();
        let result = PaletteSnapshot::capture(&palette, &picks);
        assert_eq!(result, Err(ClipboardError::InvalidIndex { index: 4, len: 4 }));
    }

    #[test]
    fn range_snapshot_requires_full_grid() {
        let range = DocRange::new(RangeKind::Cels, vec![LayerId(1), LayerId(2)], vec![0]);
        let result = RangeSnapshot::new(range, vec![None], ColorMode::Rgb, Palette::default(), 0);
        assert!(matches!(result, Err(ClipboardError::InvalidRegion(_))));
    }

    #[test]
    fn range_snapshot_indexes_layer_major() {
        let range = DocRange::new(RangeKind::Cels, vec![LayerId(1), LayerId(2)], vec![3, 4]);
        let cel = Cel::new(Point::new(1, 1), rgb_image(1, 1));
        let cels = vec![None, None, Some(cel.clone()), None];
        let snapshot = RangeSnapshot::new(range, cels, ColorMode::Rgb, Palette::default(), 0)
            .expect("snapshot");

        assert_eq!(snapshot.cel(1, 0), Some(&cel));
        assert_eq!(snapshot.cel(0, 1), None);
        assert_eq!(snapshot.cel(2, 0), None);
    }

    #[test]
    fn content_format_follows_variant() {
        assert_eq!(ClipboardContent::None.format(), ClipboardFormat::None);
        let palette = Palette::new(vec![Rgba([0, 0, 0, 255])]);
        let snapshot = PaletteSnapshot::capture(&palette, &PalettePicks::new()).expect("capture");
        assert_eq!(
            ClipboardContent::PaletteEntries(snapshot).format(),
            ClipboardFormat::PaletteEntries
        );
    }
}

//! # 像素辅助函数
//!
//! ## 设计思路
//!
//! 捕获与粘贴共用的纯函数：合成、应用蒙版、色彩模式转换、索引重映射。
//! RGB / 灰度合成直接交给 `image::imageops::overlay`（按 alpha 混合）；
//! 索引色没有 alpha，非透明索引直接覆盖。

use image::{GrayAlphaImage, GrayImage, Luma, LumaA, Rgba, RgbaImage, imageops};

use crate::doc::{ColorMode, Image, Mask, Palette, Point};
use crate::error::ClipboardError;

const TRANSPARENT_RGBA: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// 将 `src` 以局部坐标 (x, y) 合成到 `dst` 上。
pub(crate) fn composite(
    dst: &mut Image,
    src: &Image,
    x: i64,
    y: i64,
    transparent_index: u8,
) -> Result<(), ClipboardError> {
    match (dst, src) {
        (Image::Rgb(dst), Image::Rgb(src)) => imageops::overlay(dst, src, x, y),
        (Image::Grayscale(dst), Image::Grayscale(src)) => imageops::overlay(dst, src, x, y),
        (Image::Indexed(dst), Image::Indexed(src)) => {
            composite_indexed(dst, src, x, y, transparent_index)
        }
        (dst, src) => {
            return Err(ClipboardError::ColorMode(format!(
                "无法将 {} 图像合成到 {} 图像",
                src.color_mode().as_str(),
                dst.color_mode().as_str()
            )));
        }
    }
    Ok(())
}

fn composite_indexed(dst: &mut GrayImage, src: &GrayImage, x: i64, y: i64, transparent_index: u8) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        if pixel.0[0] == transparent_index {
            continue;
        }
        let dx = x + sx as i64;
        let dy = y + sy as i64;
        if dx < 0 || dy < 0 || dx >= dst.width() as i64 || dy >= dst.height() as i64 {
            continue;
        }
        dst.put_pixel(dx as u32, dy as u32, *pixel);
    }
}

/// 将未被 `mask` 选中的像素置为透明。`origin` 是图像左上角的画布坐标。
pub(crate) fn apply_mask(image: &mut Image, mask: &Mask, origin: Point, transparent_index: u8) {
    let (width, height) = (image.width(), image.height());
    for y in 0..height {
        for x in 0..width {
            let selected = mask.is_selected(origin.x as i64 + x as i64, origin.y as i64 + y as i64);
            if !selected {
                image.clear_pixel(x, y, transparent_index);
            }
        }
    }
}

/// 转换到目标色彩模式。
///
/// `source_palette` 用于解释索引色输入，`target_palette` 用于量化到索引色输出。
/// 同模式输入原样复制（索引色之间的调色板差异由 `PaletteReconciler` 负责）。
pub(crate) fn convert(
    image: &Image,
    to: ColorMode,
    source_palette: &Palette,
    target_palette: &Palette,
    transparent_index: u8,
) -> Image {
    if image.color_mode() == to {
        return image.clone();
    }

    let rgba = to_rgba(image, source_palette, transparent_index);
    match to {
        ColorMode::Rgb => Image::Rgb(rgba),
        ColorMode::Grayscale => Image::Grayscale(GrayAlphaImage::from_fn(
            rgba.width(),
            rgba.height(),
            |x, y| {
                let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
                LumaA([luma(r, g, b), a])
            },
        )),
        ColorMode::Indexed => {
            let skip = Some(transparent_index);
            Image::Indexed(GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
                let color = *rgba.get_pixel(x, y);
                if color.0[3] == 0 {
                    return Luma([transparent_index]);
                }
                let index = target_palette
                    .nearest_index(color, skip)
                    .unwrap_or(transparent_index);
                Luma([index])
            }))
        }
    }
}

fn to_rgba(image: &Image, palette: &Palette, transparent_index: u8) -> RgbaImage {
    match image {
        Image::Rgb(buf) => buf.clone(),
        Image::Grayscale(buf) => RgbaImage::from_fn(buf.width(), buf.height(), |x, y| {
            let LumaA([l, a]) = *buf.get_pixel(x, y);
            Rgba([l, l, l, a])
        }),
        Image::Indexed(buf) => RgbaImage::from_fn(buf.width(), buf.height(), |x, y| {
            let index = buf.get_pixel(x, y).0[0];
            if index == transparent_index {
                TRANSPARENT_RGBA
            } else {
                palette.get(index as usize).unwrap_or(TRANSPARENT_RGBA)
            }
        }),
    }
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// 按查找表重写每个索引。
pub(crate) fn remap_indices(image: &GrayImage, map: &[u8; 256]) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([map[image.get_pixel(x, y).0[0] as usize]])
    })
}

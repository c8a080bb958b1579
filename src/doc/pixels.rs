//! 像素缓冲
//!
//! 三种色彩模式分别由 `image` crate 的缓冲类型承载：
//! RGB → `RgbaImage`，灰度 → `GrayAlphaImage`，索引色 → `GrayImage`（每像素一个调色板索引）。

use image::{GrayAlphaImage, GrayImage, Luma, LumaA, Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use super::{Rect, Size};

/// 文档 / 图像的色彩模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Rgb,
    Grayscale,
    Indexed,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Grayscale => "grayscale",
            Self::Indexed => "indexed",
        }
    }
}

/// 完整解码后的像素缓冲。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Rgb(RgbaImage),
    Grayscale(GrayAlphaImage),
    Indexed(GrayImage),
}

impl Image {
    /// 创建全透明图像；索引色用 `transparent_index` 填充。
    pub fn blank(mode: ColorMode, size: Size, transparent_index: u8) -> Self {
        match mode {
            ColorMode::Rgb => Self::Rgb(RgbaImage::new(size.width, size.height)),
            ColorMode::Grayscale => Self::Grayscale(GrayAlphaImage::new(size.width, size.height)),
            ColorMode::Indexed => Self::Indexed(GrayImage::from_pixel(
                size.width,
                size.height,
                Luma([transparent_index]),
            )),
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        match self {
            Self::Rgb(_) => ColorMode::Rgb,
            Self::Grayscale(_) => ColorMode::Grayscale,
            Self::Indexed(_) => ColorMode::Indexed,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Self::Rgb(buf) => buf.width(),
            Self::Grayscale(buf) => buf.width(),
            Self::Indexed(buf) => buf.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Rgb(buf) => buf.height(),
            Self::Grayscale(buf) => buf.height(),
            Self::Indexed(buf) => buf.height(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// 将 (x, y) 处的像素置为透明。
    ///
    /// 调用方保证坐标位于图像内。
    pub fn clear_pixel(&mut self, x: u32, y: u32, transparent_index: u8) {
        match self {
            Self::Rgb(buf) => buf.put_pixel(x, y, Rgba([0, 0, 0, 0])),
            Self::Grayscale(buf) => buf.put_pixel(x, y, LumaA([0, 0])),
            Self::Indexed(buf) => buf.put_pixel(x, y, Luma([transparent_index])),
        }
    }

    /// 按局部坐标裁剪，超出图像的部分被 `crop_imm` 截断。
    pub fn crop(&self, rect: Rect) -> Self {
        let x = rect.origin.x.max(0) as u32;
        let y = rect.origin.y.max(0) as u32;
        let (w, h) = (rect.size.width, rect.size.height);
        match self {
            Self::Rgb(buf) => Self::Rgb(imageops::crop_imm(buf, x, y, w, h).to_image()),
            Self::Grayscale(buf) => Self::Grayscale(imageops::crop_imm(buf, x, y, w, h).to_image()),
            Self::Indexed(buf) => Self::Indexed(imageops::crop_imm(buf, x, y, w, h).to_image()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_indexed_image_uses_transparent_index() {
        let image = Image::blank(ColorMode::Indexed, Size::new(3, 2), 7);
        let Image::Indexed(buf) = &image else {
            panic!("expected indexed image");
        };
        assert!(buf.pixels().all(|p| p.0[0] == 7));
        assert_eq!(image.size(), Size::new(3, 2));
    }

    #[test]
    fn crop_clamps_to_image_bounds() {
        let image = Image::blank(ColorMode::Rgb, Size::new(4, 4), 0);
        let cropped = image.crop(Rect::new(2, 2, 10, 10));
        assert_eq!(cropped.size(), Size::new(2, 2));
        assert_eq!(cropped.color_mode(), ColorMode::Rgb);
    }
}

//! 选区蒙版
//!
//! 蒙版是一张放置在画布坐标 `origin` 处的位图，非零像素表示被选中。

use image::{GrayImage, Luma};

use super::{Point, Rect, Size};

const SELECTED: Luma<u8> = Luma([255]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    origin: Point,
    bitmap: GrayImage,
}

impl Mask {
    pub fn new(origin: Point, bitmap: GrayImage) -> Self {
        Self { origin, bitmap }
    }

    /// 整块矩形选区。
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            origin: rect.origin,
            bitmap: GrayImage::from_pixel(rect.size.width, rect.size.height, SELECTED),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        Size::new(self.bitmap.width(), self.bitmap.height())
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            origin: self.origin,
            size: self.size(),
        }
    }

    pub fn bitmap(&self) -> &GrayImage {
        &self.bitmap
    }

    /// 画布坐标 (x, y) 是否被选中。
    pub fn is_selected(&self, x: i64, y: i64) -> bool {
        let local_x = x - self.origin.x as i64;
        let local_y = y - self.origin.y as i64;
        if local_x < 0
            || local_y < 0
            || local_x >= self.bitmap.width() as i64
            || local_y >= self.bitmap.height() as i64
        {
            return false;
        }
        self.bitmap.get_pixel(local_x as u32, local_y as u32).0[0] != 0
    }

    /// 将蒙版整体移动到新的画布位置，位图不变。
    pub fn moved_to(&self, origin: Point) -> Self {
        Self {
            origin,
            bitmap: self.bitmap.clone(),
        }
    }

    /// 截取 `region`（画布坐标）范围内的蒙版，结果的 `origin` 即 `region.origin`。
    pub fn cropped(&self, region: Rect) -> Self {
        let bitmap = GrayImage::from_fn(region.size.width, region.size.height, |x, y| {
            let selected = self.is_selected(
                region.origin.x as i64 + x as i64,
                region.origin.y as i64 + y as i64,
            );
            if selected { SELECTED } else { Luma([0]) }
        });
        Self {
            origin: region.origin,
            bitmap,
        }
    }
}

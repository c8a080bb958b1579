//! 画布坐标几何类型

use serde::{Deserialize, Serialize};

/// 画布坐标点（可为负，cel 允许部分位于画布之外）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 像素尺寸。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// 当前尺寸能否完整容纳 `other`。
    pub fn contains(&self, other: Size) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

/// 轴对齐矩形，`origin` 为左上角。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Point::default(),
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    fn right(&self) -> i64 {
        self.origin.x as i64 + self.size.width as i64
    }

    fn bottom(&self) -> i64 {
        self.origin.y as i64 + self.size.height as i64
    }

    /// 两个矩形的交集；不相交时返回 `None`。
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.origin.x.max(other.origin.x);
        let top = self.origin.y.max(other.origin.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left as i64 || bottom <= top as i64 {
            return None;
        }

        Some(Rect::new(
            left,
            top,
            (right - left as i64) as u32,
            (bottom - top as i64) as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_overlapping_rects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -3, 10, 6);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 0, 5, 3)));
    }

    #[test]
    fn intersect_disjoint_or_touching_rects_is_none() {
        let a = Rect::new(0, 0, 4, 4);
        assert_eq!(a.intersect(&Rect::new(4, 0, 2, 2)), None);
        assert_eq!(a.intersect(&Rect::new(-10, -10, 3, 3)), None);
    }

    #[test]
    fn size_contains_checks_both_axes() {
        let canvas = Size::new(8, 4);
        assert!(canvas.contains(Size::new(8, 4)));
        assert!(!canvas.contains(Size::new(9, 1)));
        assert!(!canvas.contains(Size::new(1, 5)));
    }
}

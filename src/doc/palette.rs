//! 调色板与选中索引（picks）

use std::collections::BTreeSet;

use image::Rgba;

/// 索引色像素是 8 位，调色板最多 256 个可寻址条目。
pub const MAX_INDEXED_COLORS: usize = 256;

/// 有序颜色表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba<u8>>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgba<u8>> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }

    /// 覆盖已有条目；越界时返回 `false` 且不做修改。
    pub fn set(&mut self, index: usize, color: Rgba<u8>) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, color: Rgba<u8>) {
        self.colors.push(color);
    }

    /// 查找与 `color` 在 RGBA 空间中欧氏距离最近的条目。
    ///
    /// 只在前 [`MAX_INDEXED_COLORS`] 个条目中查找，结果总能放进像素。
    /// `skip` 用于排除透明索引，避免不透明像素被映射成透明。
    pub fn nearest_index(&self, color: Rgba<u8>, skip: Option<u8>) -> Option<u8> {
        self.colors
            .iter()
            .take(MAX_INDEXED_COLORS)
            .enumerate()
            .filter_map(|(index, candidate)| u8::try_from(index).ok().map(|i| (i, candidate)))
            .filter(|(index, _)| Some(*index) != skip)
            .min_by_key(|(_, candidate)| color_distance(**candidate, color))
            .map(|(index, _)| index)
    }
}

fn color_distance(a: Rgba<u8>, b: Rgba<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| {
            let d = *x as i32 - *y as i32;
            (d * d) as u32
        })
        .sum()
}

/// 调色板中被选中的索引集合（唯一、无序语义，迭代时升序）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PalettePicks {
    indices: BTreeSet<usize>,
}

impl PalettePicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// 第一个越过 `len` 的索引（若存在）。
    pub fn first_out_of_bounds(&self, len: usize) -> Option<usize> {
        self.indices.range(len..).next().copied()
    }
}

impl FromIterator<usize> for PalettePicks {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

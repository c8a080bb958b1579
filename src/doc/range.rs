//! 图层 / 帧 / cel 的结构化选区

use serde::{Deserialize, Serialize};

use super::{Image, Point};

/// 图层标识，由文档协作者分配，跨文档不保证唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// 某图层在某帧上的像素内容及其画布位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
    pub position: Point,
    pub image: Image,
}

impl Cel {
    pub fn new(position: Point, image: Image) -> Self {
        Self { position, image }
    }
}

/// 时间轴选区类型。
///
/// - `Cels`：任意矩形 cel 网格，粘贴时覆盖目标的活动图层 / 活动帧起始位置
/// - `Layers`：整图层，粘贴时在顶部新建图层
/// - `Frames`：整帧，粘贴时在活动帧之后插入新帧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    Cels,
    Frames,
    Layers,
}

/// 矩形的 (图层, 帧) 选区。
///
/// 图层按由下到上排序，帧按时间排序；网格大小为 `layers.len() * frames.len()`，
/// 因此结构上不可能出现参差不齐的选区。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRange {
    pub kind: RangeKind,
    pub layers: Vec<LayerId>,
    pub frames: Vec<usize>,
}

impl DocRange {
    pub fn new(kind: RangeKind, layers: Vec<LayerId>, frames: Vec<usize>) -> Self {
        Self {
            kind,
            layers,
            frames,
        }
    }

    pub fn cel_count(&self) -> usize {
        self.layers.len() * self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cel_count() == 0
    }
}

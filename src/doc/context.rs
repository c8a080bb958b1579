//! 文档协作者接口
//!
//! # 设计思路
//!
//! 文档 / 撤销模型不属于剪贴板子系统。这里仅定义剪贴板需要的最小读写面：
//! - `DocumentReader`：读取像素、图层 / 帧结构、选区与调色板
//! - `DocumentWriter`：插入浮动像素、清除区域、写入 cel、扩展图层 / 帧、替换调色板
//!
//! 剪贴板只借用协作者，从不持有；除了这些入口之外不会修改文档。

use super::{Cel, ColorMode, Image, LayerId, Mask, Palette, Point, Size};
use crate::error::ClipboardError;

/// 文档只读视图。
pub trait DocumentReader {
    fn color_mode(&self) -> ColorMode;

    fn canvas_size(&self) -> Size;

    /// 索引色模式下表示透明的调色板索引。
    fn transparent_index(&self) -> u8 {
        0
    }

    /// 全部图层，由下到上。
    fn layers(&self) -> Vec<LayerId>;

    fn frame_count(&self) -> usize;

    fn active_layer(&self) -> Option<LayerId>;

    fn active_frame(&self) -> usize;

    fn is_layer_visible(&self, layer: LayerId) -> bool;

    fn cel(&self, layer: LayerId, frame: usize) -> Option<&Cel>;

    /// 当前选区；`None` 表示未选择（视为整张画布）。
    fn selection(&self) -> Option<&Mask>;

    fn palette(&self) -> &Palette;
}

/// 粘贴图像时交给文档的浮动内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingPaste {
    pub image: Image,
    /// 已移动到 `position` 的蒙版
    pub mask: Option<Mask>,
    pub position: Point,
}

/// 文档写入入口。
pub trait DocumentWriter: DocumentReader {
    /// 清除指定 cel 上 `region` 覆盖的像素；`None` 表示整个 cel。
    fn clear_region(
        &mut self,
        layer: LayerId,
        frame: usize,
        region: Option<&Mask>,
    ) -> Result<(), ClipboardError>;

    /// 将像素作为浮动选区插入（由 UI 决定后续的移动 / 落地）。
    fn insert_floating(&mut self, paste: FloatingPaste) -> Result<(), ClipboardError>;

    /// 写入或移除（`None`）一个 cel。
    fn set_cel(
        &mut self,
        layer: LayerId,
        frame: usize,
        cel: Option<Cel>,
    ) -> Result<(), ClipboardError>;

    /// 在最顶部新建空图层。
    fn add_layer(&mut self) -> Result<LayerId, ClipboardError>;

    /// 在 `at` 位置插入空帧，`at == frame_count()` 表示追加。
    fn insert_frame(&mut self, at: usize) -> Result<(), ClipboardError>;

    fn set_palette(&mut self, palette: Palette) -> Result<(), ClipboardError>;
}

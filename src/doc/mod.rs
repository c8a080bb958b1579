//! # 文档值类型（doc）
//!
//! ## 设计思路
//!
//! 剪贴板与文档协作者之间交换的全部数据都是“值”：几何、像素缓冲、蒙版、
//! 调色板与时间轴选区。快照对这些值做深拷贝，因此生命周期与源文档完全解耦。
//!
//! | 子模块 | 内容 |
//! |--------|------|
//! | `geometry` | `Point` / `Size` / `Rect` |
//! | `pixels` | `ColorMode`、`Image`（基于 `image` crate 缓冲） |
//! | `mask` | `Mask` 选区蒙版 |
//! | `palette` | `Palette`、`PalettePicks` |
//! | `range` | `LayerId`、`Cel`、`DocRange`、`RangeKind` |
//! | `context` | `DocumentReader` / `DocumentWriter` 协作者接口 |

mod context;
mod geometry;
mod pixels;
mod mask;
mod palette;
mod range;

pub use context::{DocumentReader, DocumentWriter, FloatingPaste};
pub use geometry::{Point, Rect, Size};
pub use pixels::{ColorMode, Image};
pub use mask::Mask;
pub use palette::{MAX_INDEXED_COLORS, Palette, PalettePicks};
pub use range::{Cel, DocRange, LayerId, RangeKind};

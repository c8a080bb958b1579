//! 剪贴板模块
//!
//! # 设计思路
//!
//! 编辑器内部剪贴板：同一时刻只保存一份快照，格式为四种之一：
//! - **None**：空
//! - **Image**：像素 + 可选蒙版 + 可选调色板
//! - **PaletteEntries**：调色板 + 被选中的索引集合
//! - **DocumentRange**：矩形 (图层, 帧) 选区中每个 cel 的深拷贝
//!
//! 捕获总是整体替换存储，旧快照在同一步中被丢弃；粘贴只读取快照，可重复执行。
//! 快照与源文档完全独立，之后修改或关闭源文档都不会影响剪贴板内容。
//!
//! # 实现思路
//!
//! | 子模块 | 职责 |
//! |--------|------|
//! | `format` | 格式标签 `ClipboardFormat` |
//! | `snapshot` | 三种快照与 `ClipboardContent`，构造时完成校验 |
//! | `store` | `ClipboardStore`：当前内容 + 代数计数 |
//! | `config` | 粘贴策略（溢出、锚点、调色板协调） |
//! | `manager` | `Clipboard` 入口、查询与文本委托 |
//! | `capture` | cut / copy / copy_merged / copy_range / copy_image / copy_palette |
//! | `paste` | 按格式分派的粘贴 |
//! | `reconcile` | 调色板协调策略接口与两种内置实现 |
//! | `raster` | 合成、蒙版、色彩模式转换等像素操作 |

mod capture;
mod config;
mod format;
mod manager;
mod paste;
mod raster;
mod reconcile;
mod snapshot;
mod store;

pub use config::{
    ClipboardConfig, PaletteReconcileMode, PasteAnchor, RangeOverflowPolicy, SETTINGS_KEY,
};
pub use format::ClipboardFormat;
pub use manager::Clipboard;
pub use paste::{PaletteResized, PasteOutcome};
pub use reconcile::{
    NearestColorRemap, PaletteReconciler, Reconciled, ReplacePalette, TransparentIndices,
};
pub use snapshot::{ClipboardContent, ImageSnapshot, PaletteSnapshot, RangeSnapshot};
pub use store::ClipboardStore;

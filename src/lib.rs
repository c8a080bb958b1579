//! # 编辑器剪贴板：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │          编辑器 (命令 / 脚本 / UI，不在本库内)            │
//! │                                                          │
//! │   Cut ── Copy ── CopyMerged ── CopyRange ── Paste        │
//! │       │  (显式持有 Clipboard，无全局单例)                │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ DocumentReader / DocumentWriter
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            剪贴板 (Rust)                         │
//! │                                                          │
//! │  ┌─ error ────── ClipboardError (统一错误类型)           │
//! │  │                                                       │
//! │  ├─ doc ──────── 图像 / 蒙版 / 调色板 / 范围 + 协作接口  │
//! │  │                                                       │
//! │  ├─ clipboard ── 快照存储 + 捕获 + 粘贴分派              │
//! │  │   ├─ reconcile    调色板协调策略                      │
//! │  │   └─ raster       合成·蒙版·色彩模式转换              │
//! │  │                                                       │
//! │  └─ native ───── 系统剪贴板文本桥 (arboard) + 进程内缓存 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `ClipboardError` |
//! | [`doc`] | 剪贴板与文档交换的数据类型，以及文档协作者接口 |
//! | [`clipboard`] | 当前快照、捕获操作、粘贴与调色板协调 |
//! | [`native`] | 系统剪贴板纯文本读写，不可用时退回进程内缓存 |

pub mod error;
pub mod doc;
pub mod clipboard;
pub mod native;

//! # 系统剪贴板文本桥（native）
//!
//! ## 设计思路
//!
//! 系统剪贴板只用来交换纯文本（与外部应用互通、作为后备通道）；
//! 图像、调色板、文档范围严格留在进程内，永远不跨越系统边界。
//!
//! - `bridge`：`NativeTextBridge` 接口与基于 `arboard` 的桌面实现
//! - `state`：文本缓存 + “系统剪贴板可用”标志的受保护共享状态
//! - `text`：`TextClipboard`，按可用性在系统剪贴板与缓存之间切换
//!
//! ## 实现思路
//!
//! 无头或受限环境下连接失败不会报错，而是退回进程内缓存，语义相同，只是不跨进程可见。
//! 可用性标志可能由后台线程切换，因此与缓存一起放在同一把互斥锁之后。

mod bridge;
mod state;
mod text;

pub use bridge::{ArboardBridge, NativeTextBridge};
pub use state::{NativeStatus, SharedTextState};
pub use text::TextClipboard;

//! # 文本剪贴板
//!
//! ## 设计思路
//!
//! 编辑器里的文本框与系统剪贴板交换纯文本。桌面环境下直接读写系统剪贴板；
//! 无头环境、系统剪贴板连接失败或被后台线程标记为不可用时，退回进程内缓存。
//! 调用方只看到 `set_text` / `get_text`，不需要关心当前走的是哪条路径。
//!
//! ## 实现思路
//!
//! - 写入：先同步写缓存，再尝试写系统剪贴板；失败只记日志，不向上传播。
//! - 读取：系统剪贴板可用时优先读取，读取出错则回落到缓存。
//! - 可用标志与缓存放在 `SharedTextState` 中，通过 `NativeStatus` 句柄跨线程切换；
//!   系统剪贴板桥本身由 `Mutex` 保护，锁中毒时用 `lock_or_recover` 继续工作。

use std::sync::{Arc, Mutex};

use super::bridge::{ArboardBridge, NativeTextBridge};
use super::state::{NativeStatus, SharedTextState, lock_or_recover};

/// 文本剪贴板：系统剪贴板优先，不可用时退回进程内缓存。
///
/// 缓存总是同步写入，因此系统剪贴板中途失效时读到的仍是最近一次写入的文本
/// （只是不再跨进程可见）。
pub struct TextClipboard {
    bridge: Mutex<Option<Box<dyn NativeTextBridge>>>,
    state: Arc<SharedTextState>,
}

impl TextClipboard {
    /// 连接桌面系统剪贴板；连接失败时退回纯缓存模式。
    pub fn native() -> Self {
        match ArboardBridge::connect() {
            Ok(bridge) => {
                log::info!("📋 已连接系统剪贴板");
                Self::with_bridge(Box::new(bridge))
            }
            Err(err) => {
                log::warn!("📋 系统剪贴板不可用，使用进程内文本缓存: {}", err);
                Self::in_memory()
            }
        }
    }

    /// 没有系统剪贴板，仅使用进程内缓存。
    pub fn in_memory() -> Self {
        Self {
            bridge: Mutex::new(None),
            state: Arc::new(SharedTextState::new(false)),
        }
    }

    pub fn with_bridge(bridge: Box<dyn NativeTextBridge>) -> Self {
        Self {
            bridge: Mutex::new(Some(bridge)),
            state: Arc::new(SharedTextState::new(true)),
        }
    }

    /// 供后台线程切换系统剪贴板可用性的句柄。
    pub fn status(&self) -> NativeStatus {
        NativeStatus::new(Arc::clone(&self.state))
    }

    pub fn is_native_available(&self) -> bool {
        self.state.is_native_available() && lock_or_recover(&self.bridge, "系统剪贴板桥").is_some()
    }

    pub fn set_text(&self, text: &str) {
        self.state.set_cached_text(text);

        if !self.state.is_native_available() {
            log::debug!("📋 文本已写入进程内缓存（{} 字节）", text.len());
            return;
        }

        let mut bridge = lock_or_recover(&self.bridge, "系统剪贴板桥");
        if let Some(bridge) = bridge.as_mut() {
            if let Err(err) = bridge.set_text(text) {
                log::warn!("📋 写入系统剪贴板失败，仅保留进程内缓存: {}", err);
            }
        }
    }

    pub fn get_text(&self) -> Option<String> {
        if self.state.is_native_available() {
            let mut bridge = lock_or_recover(&self.bridge, "系统剪贴板桥");
            if let Some(bridge) = bridge.as_mut() {
                match bridge.get_text() {
                    Ok(text) => return text,
                    Err(err) => log::warn!("📋 读取系统剪贴板失败，改用进程内缓存: {}", err),
                }
            }
        }

        self.state.cached_text()
    }
}

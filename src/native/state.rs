//! 跨线程共享的文本状态
//!
//! UI 线程读写文本缓存，后台线程（例如备份 / 自动保存监视器）可能随时切换
//! “系统剪贴板可用”标志。两者放进同一个受互斥锁保护的小对象，
//! 调用点不再各自加锁。

use std::sync::{Arc, Mutex, MutexGuard};

/// 获取锁；若锁已中毒则记录日志并继续使用恢复出的数据。
pub(crate) fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("{}锁中毒，继续使用恢复数据", what);
            poisoned.into_inner()
        }
    }
}

#[derive(Debug, Default)]
struct TextState {
    /// 系统剪贴板不可用时使用的文本
    cached_text: Option<String>,
    native_available: bool,
}

#[derive(Debug, Default)]
pub struct SharedTextState {
    inner: Mutex<TextState>,
}

impl SharedTextState {
    pub(crate) fn new(native_available: bool) -> Self {
        Self {
            inner: Mutex::new(TextState {
                cached_text: None,
                native_available,
            }),
        }
    }

    pub fn cached_text(&self) -> Option<String> {
        lock_or_recover(&self.inner, "剪贴板文本状态").cached_text.clone()
    }

    pub fn set_cached_text(&self, text: &str) {
        lock_or_recover(&self.inner, "剪贴板文本状态").cached_text = Some(text.to_owned());
    }

    pub fn is_native_available(&self) -> bool {
        lock_or_recover(&self.inner, "剪贴板文本状态").native_available
    }

    /// 返回切换前的值。
    pub fn set_native_available(&self, available: bool) -> bool {
        let mut state = lock_or_recover(&self.inner, "剪贴板文本状态");
        std::mem::replace(&mut state.native_available, available)
    }
}

/// 交给后台线程的可用性句柄，只暴露标志的读写。
#[derive(Debug, Clone)]
pub struct NativeStatus {
    state: Arc<SharedTextState>,
}

impl NativeStatus {
    pub(crate) fn new(state: Arc<SharedTextState>) -> Self {
        Self { state }
    }

    /// 可以在任意线程调用。
    pub fn set_available(&self, available: bool) {
        let previous = self.state.set_native_available(available);
        if previous != available {
            log::info!(
                "📋 系统剪贴板{}",
                if available { "已恢复可用" } else { "不可用，改用进程内文本缓存" }
            );
        }
    }

    pub fn is_available(&self) -> bool {
        self.state.is_native_available()
    }
}

//! 系统剪贴板适配（仅纯文本）

use arboard::Clipboard;

use crate::error::ClipboardError;

/// 系统剪贴板的最小文本接口。
pub trait NativeTextBridge: Send {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// 剪贴板中没有文本时返回 `Ok(None)`。
    fn get_text(&mut self) -> Result<Option<String>, ClipboardError>;
}

/// 基于 `arboard` 的桌面实现。
///
/// 每次调用都重新打开剪贴板，不长期占用系统剪贴板句柄。
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardBridge;

impl ArboardBridge {
    /// 试探性打开一次系统剪贴板，失败说明当前环境没有可用的剪贴板（无头 / 受限）。
    pub fn connect() -> Result<Self, ClipboardError> {
        open().map(|_| Self)
    }
}

fn open() -> Result<Clipboard, ClipboardError> {
    Clipboard::new().map_err(|e| ClipboardError::NativeBridge(format!("打开系统剪贴板失败: {}", e)))
}

impl NativeTextBridge for ArboardBridge {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        open()?
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::NativeBridge(format!("写入文本失败: {}", e)))
    }

    fn get_text(&mut self) -> Result<Option<String>, ClipboardError> {
        match open()?.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::NativeBridge(format!("读取文本失败: {}", e))),
        }
    }
}

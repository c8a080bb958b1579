//! # 剪贴板管理器
//!
//! ## 设计思路
//!
//! `Clipboard` 是剪贴板子系统唯一的对外入口，持有：
//! - `ClipboardStore`：当前快照
//! - `TextClipboard`：系统剪贴板文本桥 + 进程内缓存
//! - `ClipboardConfig`：粘贴策略
//! - 可选的自定义 `PaletteReconciler`
//!
//! 不使用全局单例：由应用 / 会话上下文显式创建并持有，每个进程一个实例是调用方的约定。
//!
//! ## 实现思路
//!
//! - 捕获操作在 `capture.rs`，粘贴在 `paste.rs`，都是 `impl Clipboard` 的一部分。
//! - 捕获需要 `&mut self`，粘贴与查询只需 `&self`；
//!   未经外部同步的跨线程并发捕获在编译期即被拒绝。

use crate::doc::{DocRange, Palette, PalettePicks, Size};
use crate::native::TextClipboard;

use super::reconcile::{NearestColorRemap, PaletteReconciler, ReplacePalette};
use super::{
    ClipboardConfig, ClipboardContent, ClipboardFormat, ClipboardStore, PaletteReconcileMode,
};

pub struct Clipboard {
    pub(super) store: ClipboardStore,
    pub(super) config: ClipboardConfig,
    text: TextClipboard,
    custom_reconciler: Option<Box<dyn PaletteReconciler>>,
}

impl Clipboard {
    /// 按配置创建；`use_native_clipboard` 为真时尝试连接系统剪贴板。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use sprite_clipboard::clipboard::{Clipboard, ClipboardConfig, ClipboardFormat};
    ///
    /// let clipboard = Clipboard::new(ClipboardConfig::default());
    /// assert_eq!(clipboard.current_format(), ClipboardFormat::None);
    /// ```
    pub fn new(config: ClipboardConfig) -> Self {
        let text = if config.use_native_clipboard {
            TextClipboard::native()
        } else {
            TextClipboard::in_memory()
        };
        Self::with_text_clipboard(config, text)
    }

    /// 使用指定的文本剪贴板创建，主要用于测试或无头环境。
    pub fn with_text_clipboard(config: ClipboardConfig, text: TextClipboard) -> Self {
        Self {
            store: ClipboardStore::new(),
            config,
            text,
            custom_reconciler: None,
        }
    }

    pub fn config(&self) -> &ClipboardConfig {
        &self.config
    }

    /// 更新粘贴策略。已建立的系统剪贴板连接不受影响。
    pub fn set_config(&mut self, config: ClipboardConfig) {
        log::info!(
            "⚙️ 剪贴板配置已更新：overflow={} anchor={} reconcile={}",
            config.range_overflow.as_str(),
            config.paste_anchor.as_str(),
            config.palette_reconcile.as_str()
        );
        self.config = config;
    }

    /// 安装自定义调色板协调策略，覆盖配置中的内置策略。
    pub fn set_reconciler(&mut self, reconciler: Box<dyn PaletteReconciler>) {
        self.custom_reconciler = Some(reconciler);
    }

    pub(super) fn reconciler(&self) -> &dyn PaletteReconciler {
        match &self.custom_reconciler {
            Some(reconciler) => reconciler.as_ref(),
            None => match self.config.palette_reconcile {
                PaletteReconcileMode::Remap => &NearestColorRemap,
                PaletteReconcileMode::Replace => &ReplacePalette,
            },
        }
    }

    pub fn current_format(&self) -> ClipboardFormat {
        self.store.format()
    }

    /// 当前快照的只读视图。
    ///
    /// 视图借用剪贴板，因此无法跨越下一次捕获存活。
    pub fn content(&self) -> &ClipboardContent {
        self.store.content()
    }

    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn clear_content(&mut self) {
        self.store.clear();
    }

    /// 剪贴板中图像的尺寸；不是图像时返回 `None`。
    pub fn image_size(&self) -> Option<Size> {
        match self.store.content() {
            ClipboardContent::Image(snapshot) => Some(snapshot.image().size()),
            _ => None,
        }
    }

    /// 图像或调色板条目附带的调色板。
    pub fn palette(&self) -> Option<&Palette> {
        match self.store.content() {
            ClipboardContent::Image(snapshot) => snapshot.palette(),
            ClipboardContent::PaletteEntries(snapshot) => Some(snapshot.palette()),
            _ => None,
        }
    }

    pub fn palette_picks(&self) -> Option<&PalettePicks> {
        match self.store.content() {
            ClipboardContent::PaletteEntries(snapshot) => Some(snapshot.picks()),
            _ => None,
        }
    }

    /// 文档范围的类型、图层与帧。
    pub fn range_info(&self) -> Option<&DocRange> {
        match self.store.content() {
            ClipboardContent::DocumentRange(snapshot) => Some(snapshot.range()),
            _ => None,
        }
    }

    pub fn text(&self) -> &TextClipboard {
        &self.text
    }

    pub fn set_clipboard_text(&self, text: &str) {
        self.text.set_text(text);
    }

    pub fn get_clipboard_text(&self) -> Option<String> {
        self.text.get_text()
    }
}

//! # 剪贴板存储
//!
//! ## 设计思路
//!
//! 任一时刻只持有一个内容；每次捕获整体替换，旧快照随即被释放（没有历史、没有引用计数）。
//! 格式标签不单独存储，而是从内容分支推导，`format() == content().format()` 恒成立。
//!
//! ## 实现思路
//!
//! - 替换与清空需要 `&mut self`，只读视图借用 `&self`，
//!   因此借用检查器保证没有任何视图能跨越一次捕获存活。
//! - `generation` 在每次替换 / 清空时递增，供调用方判断之前读取的信息是否已过期。

use super::{ClipboardContent, ClipboardFormat};

#[derive(Debug, Default)]
pub struct ClipboardStore {
    content: ClipboardContent,
    generation: u64,
}

impl ClipboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 原子替换当前内容，旧内容在此处被释放。
    pub fn set_content(&mut self, content: ClipboardContent) {
        let previous = std::mem::replace(&mut self.content, content);
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "📋 剪贴板内容已替换: {} -> {}（generation={}）",
            previous.format().as_str(),
            self.content.format().as_str(),
            self.generation
        );
    }

    pub fn clear(&mut self) {
        self.set_content(ClipboardContent::None);
    }

    pub fn format(&self) -> ClipboardFormat {
        self.content.format()
    }

    pub fn content(&self) -> &ClipboardContent {
        &self.content
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

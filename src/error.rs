//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `ClipboardError` 枚举，所有捕获（copy/cut）与粘贴操作
//! 统一返回 `Result<T, ClipboardError>`，调用方（UI / 脚本层）按分支匹配决定提示文案。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 捕获阶段的校验错误（`InvalidRegion` / `InvalidIndex` / `EmptyRange`）
//!   一律在写入存储之前返回，存储内容保持不变。
//! - “无内容可粘贴”与“调色板被扩容”属于提示性信息，不在此枚举中，
//!   由 `PasteOutcome` 报告。

/// 剪贴板子系统统一错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// 选区 / 蒙版越界，或引用了文档中不存在的图层、帧
    #[error("无效区域: {0}")]
    InvalidRegion(String),

    /// 调色板选中索引越界
    #[error("调色板索引越界: {index}（调色板大小 {len}）")]
    InvalidIndex { index: usize, len: usize },

    /// 粘贴后调色板将超出 8 位索引可寻址的条目数
    #[error("调色板过大: 需要 {required} 个条目，最多 {max} 个")]
    PaletteTooLarge { required: usize, max: usize },

    /// 结构化选区不包含任何 cel
    #[error("选区为空，没有可复制的 cel")]
    EmptyRange,

    /// 目标文档容纳不下剪贴板中的图层 / 帧网格
    #[error(
        "粘贴范围过大: 需要 {required_layers} 个图层、{required_frames} 帧，\
         目标仅有 {available_layers} 个图层、{available_frames} 帧"
    )]
    RangeTooLarge {
        required_layers: usize,
        available_layers: usize,
        required_frames: usize,
        available_frames: usize,
    },

    /// 像素数据的色彩模式彼此不兼容
    #[error("色彩模式不兼容: {0}")]
    ColorMode(String),

    /// 文档协作者的写入入口失败
    #[error("文档操作失败: {0}")]
    Document(String),

    /// 系统剪贴板读写失败
    #[error("系统剪贴板操作失败: {0}")]
    NativeBridge(String),

    /// 配置项无法解析
    #[error("配置错误: {0}")]
    InvalidConfig(String),
}

impl From<ClipboardError> for String {
    /// 兼容仍使用字符串错误的调用点。
    fn from(error: ClipboardError) -> Self {
        error.to_string()
    }
}

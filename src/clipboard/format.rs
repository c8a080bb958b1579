use serde::Serialize;

/// 剪贴板当前内容的格式标签。
///
/// 由存储内容的枚举分支推导，不能单独设置。UI 用它决定各类粘贴菜单是否可用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClipboardFormat {
    None,
    Image,
    DocumentRange,
    PaletteEntries,
}

impl ClipboardFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Image => "image",
            Self::DocumentRange => "documentRange",
            Self::PaletteEntries => "paletteEntries",
        }
    }
}

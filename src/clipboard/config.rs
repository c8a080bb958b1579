//! # 配置模块
//!
//! ## 设计思路
//!
//! 将粘贴时的“可调策略”集中到 `ClipboardConfig`，由调用层（UI / 脚本）决定，
//! 剪贴板核心不擅自猜测：
//! - 范围溢出策略：目标文档图层 / 帧不足时失败还是扩展
//! - 图像粘贴锚点：居中、原点或捕获时的位置
//! - 调色板协调：最近色重映射还是直接替换调色板
//! - 是否尝试使用系统剪贴板
//!
//! ## 实现思路
//!
//! - `Default` 提供保守配置（溢出即失败，不会静默改动文档结构）。
//! - 各策略枚举提供 `from_str` / `as_str`，字符串稳定，便于持久化到设置文件。
//! - `from_settings` 从应用设置 JSON 的 `clipboard` 字段读取，缺失即默认值。

use serde::{Deserialize, Serialize};

use crate::error::ClipboardError;

/// 设置 JSON 中剪贴板配置所在的键。
pub const SETTINGS_KEY: &str = "clipboard";

/// 粘贴文档范围时目标图层 / 帧不足的处理策略。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOverflowPolicy {
    /// 返回 `RangeTooLarge`，文档不做任何修改
    #[default]
    Fail,
    /// 新建缺少的图层 / 帧
    Extend,
}

impl RangeOverflowPolicy {
    /// 从外部字符串解析策略。
    ///
    /// # 示例
    /// ```rust
    /// use sprite_clipboard::clipboard::RangeOverflowPolicy;
    ///
    /// let policy = RangeOverflowPolicy::from_str("extend")?;
    /// assert_eq!(policy.as_str(), "extend");
    /// # Ok::<(), sprite_clipboard::error::ClipboardError>(())
    /// ```
    pub fn from_str(value: &str) -> Result<Self, ClipboardError> {
        match value.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "extend" => Ok(Self::Extend),
            other => Err(ClipboardError::InvalidConfig(format!(
                "未知范围溢出策略：{}（可选：fail / extend）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Extend => "extend",
        }
    }
}

/// 图像粘贴的落点。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteAnchor {
    /// 画布居中
    #[default]
    Centered,
    /// 画布左上角
    Origin,
    /// 捕获时蒙版所在位置（无蒙版时回退到居中）
    Captured,
}

impl PasteAnchor {
    pub fn from_str(value: &str) -> Result<Self, ClipboardError> {
        match value.trim().to_lowercase().as_str() {
            "centered" => Ok(Self::Centered),
            "origin" => Ok(Self::Origin),
            "captured" => Ok(Self::Captured),
            other => Err(ClipboardError::InvalidConfig(format!(
                "未知粘贴锚点：{}（可选：centered / origin / captured）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Centered => "centered",
            Self::Origin => "origin",
            Self::Captured => "captured",
        }
    }
}

/// 索引色图像粘贴到调色板不同的索引色文档时的协调方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteReconcileMode {
    /// 逐索引映射到目标调色板中最接近的颜色
    #[default]
    Remap,
    /// 用剪贴板中的调色板替换目标调色板
    Replace,
}

impl PaletteReconcileMode {
    pub fn from_str(value: &str) -> Result<Self, ClipboardError> {
        match value.trim().to_lowercase().as_str() {
            "remap" => Ok(Self::Remap),
            "replace" => Ok(Self::Replace),
            other => Err(ClipboardError::InvalidConfig(format!(
                "未知调色板协调方式：{}（可选：remap / replace）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remap => "remap",
            Self::Replace => "replace",
        }
    }
}

/// 剪贴板配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClipboardConfig {
    pub range_overflow: RangeOverflowPolicy,
    pub paste_anchor: PasteAnchor,
    pub palette_reconcile: PaletteReconcileMode,
    /// 为 `false` 时只使用进程内文本缓存（无头 / 受限环境）。
    pub use_native_clipboard: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            range_overflow: RangeOverflowPolicy::Fail,
            paste_anchor: PasteAnchor::Centered,
            palette_reconcile: PaletteReconcileMode::Remap,
            use_native_clipboard: true,
        }
    }
}

impl ClipboardConfig {
    /// 从应用设置 JSON 读取剪贴板配置。
    ///
    /// # 示例
    /// ```rust
    /// use sprite_clipboard::clipboard::{ClipboardConfig, RangeOverflowPolicy};
    ///
    /// let settings = serde_json::json!({ "clipboard": { "rangeOverflow": "extend" } });
    /// let config = ClipboardConfig::from_settings(&settings)?;
    /// assert_eq!(config.range_overflow, RangeOverflowPolicy::Extend);
    /// # Ok::<(), sprite_clipboard::error::ClipboardError>(())
    /// ```
    pub fn from_settings(settings: &serde_json::Value) -> Result<Self, ClipboardError> {
        let Some(section) = settings.get(SETTINGS_KEY) else {
            return Ok(Self::default());
        };

        let config = serde_json::from_value::<Self>(section.clone())
            .map_err(|e| ClipboardError::InvalidConfig(format!("解析剪贴板配置失败: {}", e)))?;

        log::debug!(
            "⚙️ 剪贴板配置已加载：overflow={} anchor={} reconcile={} native={}",
            config.range_overflow.as_str(),
            config.paste_anchor.as_str(),
            config.palette_reconcile.as_str(),
            config.use_native_clipboard
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_section_yields_defaults() {
        let config = ClipboardConfig::from_settings(&json!({ "theme": "dark" })).expect("defaults");
        assert_eq!(config, ClipboardConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings = json!({
            "clipboard": { "pasteAnchor": "captured", "useNativeClipboard": false }
        });
        let config = ClipboardConfig::from_settings(&settings).expect("parse");
        assert_eq!(config.paste_anchor, PasteAnchor::Captured);
        assert!(!config.use_native_clipboard);
        assert_eq!(config.range_overflow, RangeOverflowPolicy::Fail);
        assert_eq!(config.palette_reconcile, PaletteReconcileMode::Remap);
    }

    #[test]
    fn unknown_policy_is_invalid_config() {
        let settings = json!({ "clipboard": { "rangeOverflow": "truncate" } });
        let result = ClipboardConfig::from_settings(&settings);
        assert!(matches!(result, Err(ClipboardError::InvalidConfig(_))));
    }

    #[test]
    fn policy_strings_are_stable() {
        for policy in [RangeOverflowPolicy::Fail, RangeOverflowPolicy::Extend] {
            assert_eq!(RangeOverflowPolicy::from_str(policy.as_str()), Ok(policy));
        }
        for anchor in [PasteAnchor::Centered, PasteAnchor::Origin, PasteAnchor::Captured] {
            assert_eq!(PasteAnchor::from_str(anchor.as_str()), Ok(anchor));
        }
        for mode in [PaletteReconcileMode::Remap, PaletteReconcileMode::Replace] {
            assert_eq!(PaletteReconcileMode::from_str(mode.as_str()), Ok(mode));
        }
        assert_eq!(PasteAnchor::from_str(" Origin "), Ok(PasteAnchor::Origin));
    }
}

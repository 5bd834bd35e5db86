// ==========================================
// 非洲关键矿产数据看板 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据文件一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 矿区状态 (Site Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteStatus {
    Active,   // 在产
    Inactive, // 停产
    Planned,  // 规划中
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteStatus::Active => write!(f, "ACTIVE"),
            SiteStatus::Inactive => write!(f, "INACTIVE"),
            SiteStatus::Planned => write!(f, "PLANNED"),
        }
    }
}

impl SiteStatus {
    /// 从字符串解析矿区状态（大小写不敏感）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Some(SiteStatus::Active),
            "INACTIVE" => Some(SiteStatus::Inactive),
            "PLANNED" => Some(SiteStatus::Planned),
            _ => None,
        }
    }

    /// 转换为数据文件存储的字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Active => "ACTIVE",
            SiteStatus::Inactive => "INACTIVE",
            SiteStatus::Planned => "PLANNED",
        }
    }
}

// ==========================================
// 校验等级 (Validation Level)
// ==========================================
// Error 级别违规阻断整次加载; Warning/Info 仅记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationLevel::Info => write!(f, "INFO"),
            ValidationLevel::Warning => write!(f, "WARNING"),
            ValidationLevel::Error => write!(f, "ERROR"),
        }
    }
}

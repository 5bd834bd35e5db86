// ==========================================
// 非洲关键矿产数据看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户可解释的错误消息
// 红线: 所有错误信息必须指明违规的实体/字段（可解释性）
// ==========================================

use crate::importer::LoadError;
use crate::repository::StoreError;
use thiserror::Error;

// ==========================================
// InvalidFilterError - 过滤条件错误
// ==========================================

/// 过滤条件错误
///
/// 引用了未知代码、或年份区间不一致的调用方输入；
/// 直接上抛给调用方，不做自动重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFilterError {
    #[error("未知国家代码: {0}")]
    UnknownCountryCode(String),

    #[error("未知矿种代码: {0}")]
    UnknownMineralCode(String),

    #[error("无效年份区间: start={start} > end={end}")]
    EmptyYearRange { start: i32, end: i32 },
}

// ==========================================
// ApiError - API层错误
// ==========================================

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 调用方输入错误 =====
    #[error("过滤条件无效: {0}")]
    InvalidFilter(#[from] InvalidFilterError),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ===== 加载错误 =====
    #[error("快照加载失败: {0}")]
    LoadFailed(#[from] LoadError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 StoreError 转换
// 目的: 将仓储层的技术错误转换为用户可解释的业务错误
// ==========================================
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoSnapshotPublished => {
                ApiError::NotFound("尚未发布任何快照，请先加载数据目录".to_string())
            }
            StoreError::LockError(msg) => {
                ApiError::InternalError(format!("快照锁获取失败: {}", msg))
            }
            StoreError::InternalError(msg) => ApiError::InternalError(msg),
            StoreError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_conversion() {
        let api_err: ApiError = StoreError::NoSnapshotPublished.into();
        match api_err {
            ApiError::NotFound(msg) => assert!(msg.contains("尚未发布")),
            _ => panic!("Expected NotFound"),
        }

        let api_err: ApiError = StoreError::LockError("poisoned".to_string()).into();
        assert!(matches!(api_err, ApiError::InternalError(_)));
    }

    #[test]
    fn test_invalid_filter_error_messages() {
        let err = InvalidFilterError::UnknownMineralCode("XX".to_string());
        assert!(err.to_string().contains("XX"));

        let err = InvalidFilterError::EmptyYearRange {
            start: 2024,
            end: 2020,
        };
        assert!(err.to_string().contains("2024"));
        assert!(err.to_string().contains("2020"));
    }
}

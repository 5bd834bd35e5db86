// ==========================================
// 非洲关键矿产数据看板 - 快照仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 快照仓储层错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 并发控制错误 =====
    #[error("快照锁获取失败: {0}")]
    LockError(String),

    // ===== 状态错误 =====
    #[error("尚未发布任何快照")]
    NoSnapshotPublished,

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;

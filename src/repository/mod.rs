// ==========================================
// 非洲关键矿产数据看板 - 快照仓储层
// ==========================================
// 职责: 快照持有与原子发布
// 红线: 不含业务规则，不做聚合计算
// ==========================================

pub mod error;
pub mod snapshot_store;

// 重导出核心类型
pub use error::{StoreError, StoreResult};
pub use snapshot_store::SnapshotStore;

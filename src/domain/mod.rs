// ==========================================
// 非洲关键矿产数据看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod country;
pub mod filter;
pub mod mineral;
pub mod production;
pub mod site;
pub mod snapshot;
pub mod types;
pub mod user;

// 重导出核心类型
pub use country::{Country, RawCountryRecord};
pub use filter::{QueryFilter, YearRange};
pub use mineral::{Mineral, RawMineralRecord, DEFAULT_UNIT};
pub use production::{ProductionStat, RawProductionRecord, StatKey};
pub use site::{RawSiteRecord, Site};
pub use snapshot::{Snapshot, SnapshotMeta, TableCounts};
pub use types::{SiteStatus, ValidationLevel};
pub use user::{RawRoleRecord, RawUserRecord, Role, User};

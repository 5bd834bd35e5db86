// ==========================================
// 非洲关键矿产数据看板 - 引擎层
// ==========================================
// 职责: 对快照做派生计算
// 红线: 纯函数、无副作用; 输出顺序必须确定可复现
// ==========================================

pub mod aggregation;
pub mod overview;
pub mod ranking;
pub mod trend;

// 重导出核心引擎
pub use aggregation::{AggregationEngine, TotalsRow};
pub use overview::{
    CountryProfile, CountryTotal, DashboardOverview, MineralTotal, OverviewEngine, SiteMapPoint,
};
pub use ranking::{RankingEngine, RankingEntry};
pub use trend::{TrendEngine, TrendPoint};

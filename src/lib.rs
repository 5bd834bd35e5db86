// ==========================================
// 非洲关键矿产数据看板 - 核心库
// ==========================================
// 技术栈: Rust + 内存快照
// 系统定位: 决策支持服务 (只读聚合查询)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 快照仓储层 - 快照持有与原子发布
pub mod repository;

// 引擎层 - 聚合计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{SiteStatus, ValidationLevel};

// 领域实体
pub use domain::{
    Country, Mineral, ProductionStat, Role, Site, Snapshot, SnapshotMeta, StatKey, User,
};

// 引擎
pub use engine::{AggregationEngine, OverviewEngine, RankingEngine, TrendEngine};

// 导入层
pub use importer::{LoadError, LoadReport, ParseError, ValidationError};

// API
pub use api::{
    ApiError, ApiResult, DashboardApi, InvalidFilterError, QueryApi, QueryFilter, UserApi,
    YearRange,
};

// 快照仓储
pub use repository::SnapshotStore;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "非洲关键矿产数据看板";

// 数据目录下的表文件名（不含扩展名）
pub const TABLE_COUNTRIES: &str = "countries";
pub const TABLE_MINERALS: &str = "minerals";
pub const TABLE_SITES: &str = "sites";
pub const TABLE_PRODUCTION: &str = "production_stats";
pub const TABLE_USERS: &str = "users";
pub const TABLE_ROLES: &str = "roles";

// ==========================================
// 预编译检查
// ==========================================

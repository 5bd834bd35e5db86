// ==========================================
// 非洲关键矿产数据看板 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供外部展示层调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod filters;
pub mod query_api;
pub mod user_api;

// 重导出核心类型
pub use dashboard_api::{ComparisonEntry, DashboardApi};
pub use error::{ApiError, ApiResult, InvalidFilterError};
pub use filters::validate_filter;
pub use query_api::{QueryApi, TotalsResult};
pub use user_api::UserApi;

// 过滤条件为领域值对象，在此一并重导出，方便调用方
pub use crate::domain::{QueryFilter, YearRange};

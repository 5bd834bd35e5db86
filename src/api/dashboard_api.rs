// ==========================================
// 非洲关键矿产数据看板 - 看板 API
// ==========================================
// 职责: 封装总览引擎，提供看板聚合查询
// 架构: API 层 → 总览引擎（纯函数） / 仓储层（快照）
// 展示层（图表/地图渲染）为外部协作方，仅消费此处 DTO
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, InvalidFilterError};
use crate::engine::{
    CountryProfile, CountryTotal, DashboardOverview, MineralTotal, OverviewEngine, SiteMapPoint,
};
use crate::repository::SnapshotStore;
use serde::{Deserialize, Serialize};

// 领先榜条数上限（防御调用方的异常取值）
const MAX_TOP_LIST_LIMIT: usize = 1000;

// ==========================================
// DTO 类型定义
// ==========================================

/// 多国对比条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub country_iso: String,
    pub country_name: String,
    /// 分矿种产量合计（跨全部年份）
    pub production_by_mineral: Vec<MineralTotal>,
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 职责：
/// 1. 顶部指标 + 产量领先榜（总览）
/// 2. 国家画像与多国对比
/// 3. 地图点位（可按矿种过滤）
pub struct DashboardApi {
    store: Arc<SnapshotStore>,
    overview_engine: OverviewEngine,
    /// 领先榜默认条数（来自配置）
    default_top_limit: usize,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - store: 快照仓储
    /// - default_top_limit: 领先榜默认条数
    pub fn new(store: Arc<SnapshotStore>, default_top_limit: usize) -> Self {
        Self {
            store,
            overview_engine: OverviewEngine::new(),
            default_top_limit: default_top_limit.max(1),
        }
    }

    // ==========================================
    // 总览接口
    // ==========================================

    /// 看板总览（顶部指标 + 领先榜，条数取配置默认值）
    pub fn get_overview(&self) -> ApiResult<DashboardOverview> {
        let snapshot = self.store.current()?;
        Ok(self
            .overview_engine
            .overview(&snapshot, self.default_top_limit))
    }

    /// 产量领先矿种
    ///
    /// # 参数
    /// - limit: 返回条数（1..=1000）
    pub fn top_minerals(&self, limit: usize) -> ApiResult<Vec<MineralTotal>> {
        check_limit(limit)?;
        let snapshot = self.store.current()?;
        Ok(self.overview_engine.top_minerals(&snapshot, limit))
    }

    /// 产量领先国家
    ///
    /// # 参数
    /// - limit: 返回条数（1..=1000）
    pub fn top_countries(&self, limit: usize) -> ApiResult<Vec<CountryTotal>> {
        check_limit(limit)?;
        let snapshot = self.store.current()?;
        Ok(self.overview_engine.top_countries(&snapshot, limit))
    }

    // ==========================================
    // 国家画像接口
    // ==========================================

    /// 国家画像
    ///
    /// # 返回
    /// - Ok(CountryProfile): 国家存在
    /// - Err(ApiError::NotFound): 未知 ISO 代码
    pub fn get_country_profile(&self, iso_code: &str) -> ApiResult<CountryProfile> {
        let iso = iso_code.trim().to_uppercase();
        if iso.is_empty() {
            return Err(ApiError::InvalidInput("国家代码不能为空".to_string()));
        }

        let snapshot = self.store.current()?;
        self.overview_engine
            .country_profile(&snapshot, &iso)
            .ok_or_else(|| ApiError::NotFound(format!("国家(iso={})不存在", iso)))
    }

    /// 多国对比（分矿种产量）
    ///
    /// # 参数
    /// - iso_codes: 国家 ISO 代码列表
    ///
    /// # 返回
    /// - Ok(Vec<ComparisonEntry>): 按入参顺序
    /// - Err(ApiError::InvalidFilter): 引用了未知国家
    pub fn compare_countries(&self, iso_codes: &[String]) -> ApiResult<Vec<ComparisonEntry>> {
        if iso_codes.is_empty() {
            return Err(ApiError::InvalidInput("对比国家列表不能为空".to_string()));
        }

        let snapshot = self.store.current()?;
        let mut entries = Vec::with_capacity(iso_codes.len());
        for raw in iso_codes {
            let iso = raw.trim().to_uppercase();
            let profile = self
                .overview_engine
                .country_profile(&snapshot, &iso)
                .ok_or(InvalidFilterError::UnknownCountryCode(iso))?;
            entries.push(ComparisonEntry {
                country_iso: profile.country_iso,
                country_name: profile.country_name,
                production_by_mineral: profile.production_by_mineral,
            });
        }
        Ok(entries)
    }

    // ==========================================
    // 地图接口
    // ==========================================

    /// 地图点位（可按矿种过滤，按矿区 ID 有序）
    ///
    /// # 参数
    /// - mineral: 矿种代码（None 表示全部）
    ///
    /// # 返回
    /// - Ok(Vec<SiteMapPoint>): 外部地图渲染器的输入
    /// - Err(ApiError::InvalidFilter): 矿种代码无法解析
    pub fn list_site_map_points(&self, mineral: Option<&str>) -> ApiResult<Vec<SiteMapPoint>> {
        let snapshot = self.store.current()?;

        let filter = match mineral {
            Some(raw) => {
                let code = raw.trim().to_uppercase();
                if code.is_empty() {
                    return Err(ApiError::InvalidInput("矿种代码不能为空".to_string()));
                }
                if snapshot.mineral(&code).is_none() {
                    return Err(InvalidFilterError::UnknownMineralCode(code).into());
                }
                Some(code)
            }
            None => None,
        };

        Ok(self
            .overview_engine
            .site_map_points(&snapshot, filter.as_deref()))
    }
}

// ==========================================
// 输入校验辅助
// ==========================================

fn check_limit(limit: usize) -> ApiResult<()> {
    if limit == 0 || limit > MAX_TOP_LIST_LIMIT {
        return Err(ApiError::InvalidInput(format!(
            "limit必须在1-{}之间",
            MAX_TOP_LIST_LIMIT
        )));
    }
    Ok(())
}

// ==========================================
// 非洲关键矿产数据看板 - 查询 API
// ==========================================
// 职责: 过滤条件翻译 + 聚合引擎调用 + 快照重载
// 架构: API 层 → 引擎层（纯函数） / 仓储层（快照）
// 除 reload_snapshot 外全部为同步只读操作
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, InvalidFilterError};
use crate::api::filters::validate_filter;
use crate::domain::{Country, Mineral, QueryFilter};
use crate::engine::{
    AggregationEngine, RankingEngine, RankingEntry, TotalsRow, TrendEngine, TrendPoint,
};
use crate::importer::{LoadReport, SnapshotImporter};
use crate::repository::SnapshotStore;
use serde::{Deserialize, Serialize};
use tracing::info;

// ==========================================
// DTO 类型定义
// ==========================================

/// get_totals 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsResult {
    pub rows: Vec<TotalsRow>,
    /// 过滤后总量
    pub grand_total: f64,
}

// ==========================================
// QueryApi - 查询 API
// ==========================================

/// 查询API
///
/// 职责：
/// 1. 校验调用方过滤条件（未知代码 / 年份区间不一致 → InvalidFilter）
/// 2. 委托聚合/趋势/排名引擎计算
/// 3. 快照重载（成功后原子发布；失败保留旧快照）
pub struct QueryApi {
    store: Arc<SnapshotStore>,
    loader: Arc<dyn SnapshotImporter>,
    aggregation_engine: AggregationEngine,
    trend_engine: TrendEngine,
    ranking_engine: RankingEngine,
}

impl QueryApi {
    /// 创建新的QueryApi实例
    ///
    /// # 参数
    /// - store: 快照仓储
    /// - loader: 快照加载器（reload_snapshot 使用）
    pub fn new(store: Arc<SnapshotStore>, loader: Arc<dyn SnapshotImporter>) -> Self {
        Self {
            store,
            loader,
            aggregation_engine: AggregationEngine::new(),
            trend_engine: TrendEngine::new(),
            ranking_engine: RankingEngine::new(),
        }
    }

    // ==========================================
    // 列表查询接口
    // ==========================================

    /// 国家列表（按 ISO 代码有序）
    pub fn list_countries(&self) -> ApiResult<Vec<Country>> {
        let snapshot = self.store.current()?;
        Ok(snapshot.countries.values().cloned().collect())
    }

    /// 矿种列表（按代码有序）
    pub fn list_minerals(&self) -> ApiResult<Vec<Mineral>> {
        let snapshot = self.store.current()?;
        Ok(snapshot.minerals.values().cloned().collect())
    }

    // ==========================================
    // 聚合查询接口
    // ==========================================

    /// 过滤后的产量合计
    ///
    /// # 参数
    /// - filter: 过滤条件（国家集合 / 矿种集合 / 年份区间，各自可选）
    ///
    /// # 返回
    /// - Ok(TotalsResult): 行集 + 总量；合法但无匹配时为空行集
    /// - Err(ApiError::InvalidFilter): 引用未知代码或年份区间不一致
    pub fn get_totals(&self, filter: &QueryFilter) -> ApiResult<TotalsResult> {
        let snapshot = self.store.current()?;
        validate_filter(filter, &snapshot)?;

        let rows = self.aggregation_engine.totals(&snapshot, filter);
        let grand_total = rows.iter().map(|row| row.quantity).sum();
        Ok(TotalsResult { rows, grand_total })
    }

    /// (国家, 矿种) 年度产量趋势
    ///
    /// # 参数
    /// - country: 国家 ISO 代码
    /// - mineral: 矿种代码
    ///
    /// # 返回
    /// - Ok(Vec<TrendPoint>): 按年份升序; 缺失年份缺位，不补零
    /// - Err(ApiError::InvalidFilter): 代码无法解析
    pub fn get_trend(&self, country: &str, mineral: &str) -> ApiResult<Vec<TrendPoint>> {
        let country = normalize_code(country, "国家代码")?;
        let mineral = normalize_code(mineral, "矿种代码")?;

        let snapshot = self.store.current()?;
        if snapshot.country(&country).is_none() {
            return Err(InvalidFilterError::UnknownCountryCode(country).into());
        }
        if snapshot.mineral(&mineral).is_none() {
            return Err(InvalidFilterError::UnknownMineralCode(mineral).into());
        }

        Ok(self.trend_engine.trend(&snapshot, &country, &mineral))
    }

    /// 某矿种某年份的国家排名
    ///
    /// # 参数
    /// - mineral: 矿种代码
    /// - year: 统计年份
    ///
    /// # 返回
    /// - Ok(Vec<RankingEntry>): 产量降序，平局按 ISO 升序；无记录时为空
    /// - Err(ApiError::InvalidFilter): 矿种代码无法解析
    pub fn get_ranking(&self, mineral: &str, year: i32) -> ApiResult<Vec<RankingEntry>> {
        let mineral = normalize_code(mineral, "矿种代码")?;

        let snapshot = self.store.current()?;
        if snapshot.mineral(&mineral).is_none() {
            return Err(InvalidFilterError::UnknownMineralCode(mineral).into());
        }

        Ok(self.ranking_engine.ranking(&snapshot, &mineral, year))
    }

    // ==========================================
    // 快照重载接口
    // ==========================================

    /// 重载快照
    ///
    /// 新快照完整加载并校验通过后才原子发布；
    /// 任何失败都保留旧快照继续服务，在途读者不受影响。
    ///
    /// # 参数
    /// - path: 数据目录
    ///
    /// # 返回
    /// - Ok(LoadReport): 本次加载报告（含非致命违规）
    /// - Err(ApiError::LoadFailed): 解析或校验失败
    pub async fn reload_snapshot<P: AsRef<Path> + Send>(&self, path: P) -> ApiResult<LoadReport> {
        let outcome = self.loader.load_from_dir(path.as_ref()).await?;
        let generation = self.store.publish(outcome.snapshot)?;
        info!(
            snapshot_id = %outcome.report.snapshot_id,
            generation = generation,
            "快照重载完成"
        );
        Ok(outcome.report)
    }
}

// ==========================================
// 输入规范化辅助
// ==========================================

fn normalize_code(raw: &str, what: &str) -> ApiResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", what)));
    }
    Ok(trimmed.to_uppercase())
}

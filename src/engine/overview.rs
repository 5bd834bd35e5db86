// ==========================================
// 非洲关键矿产数据看板 - 总览引擎
// ==========================================
// 职责: 看板顶部指标、产量领先榜、国家画像、地图点位
// 口径: 产量跨全部年份求和（与源看板一致）
// ==========================================

use crate::domain::{Snapshot, TableCounts};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

// ==========================================
// 输出 DTO
// ==========================================

/// 单矿种产量合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralTotal {
    pub mineral_code: String,
    pub mineral_name: String,
    pub unit: String,
    pub total_quantity: f64,
}

/// 单国家产量合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTotal {
    pub country_iso: String,
    pub country_name: String,
    pub total_quantity: f64,
}

/// 看板总览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// GDP 合计（十亿美元，数据缺失的国家计零）
    pub total_gdp_billion_usd: f64,
    /// 矿业收入合计（十亿美元，数据缺失的国家计零）
    pub total_mining_revenue_billion_usd: f64,
    pub counts: TableCounts,
    pub top_minerals: Vec<MineralTotal>,
    pub top_countries: Vec<CountryTotal>,
}

/// 国家画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub country_iso: String,
    pub country_name: String,
    pub region: Option<String>,
    pub gdp_billion_usd: Option<f64>,
    pub mining_revenue_billion_usd: Option<f64>,
    /// 矿业收入占 GDP 比例（百分比）
    pub mining_share_pct: Option<f64>,
    pub key_projects: Option<String>,
    /// 分矿种产量合计（跨全部年份）
    pub production_by_mineral: Vec<MineralTotal>,
    pub site_count: usize,
}

/// 地图点位（交给外部地图渲染器）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMapPoint {
    pub site_id: String,
    pub site_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: crate::domain::SiteStatus,
    pub country_iso: String,
    pub country_name: String,
    pub mineral_code: String,
    pub mineral_name: String,
    pub output_tonnes: Option<f64>,
}

// ==========================================
// OverviewEngine - 总览引擎
// ==========================================
pub struct OverviewEngine {
    // 无状态引擎,不需要注入依赖
}

impl OverviewEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 产量领先矿种（跨国家、跨年份合计，降序；平局按代码升序）
    pub fn top_minerals(&self, snapshot: &Snapshot, limit: usize) -> Vec<MineralTotal> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for stat in snapshot.production.values() {
            *totals.entry(stat.mineral_code.as_str()).or_insert(0.0) += stat.quantity;
        }

        let mut rows: Vec<MineralTotal> = totals
            .into_iter()
            .map(|(code, total_quantity)| {
                let mineral = snapshot.mineral(code);
                MineralTotal {
                    mineral_code: code.to_string(),
                    mineral_name: mineral.map(|m| m.name.clone()).unwrap_or_default(),
                    unit: mineral
                        .map(|m| m.unit.clone())
                        .unwrap_or_else(|| crate::domain::DEFAULT_UNIT.to_string()),
                    total_quantity,
                }
            })
            .collect();

        rows.sort_by(|a, b| match b.total_quantity.total_cmp(&a.total_quantity) {
            Ordering::Equal => a.mineral_code.cmp(&b.mineral_code),
            other => other,
        });
        rows.truncate(limit);
        rows
    }

    /// 产量领先国家（跨矿种、跨年份合计，降序；平局按 ISO 升序）
    pub fn top_countries(&self, snapshot: &Snapshot, limit: usize) -> Vec<CountryTotal> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for stat in snapshot.production.values() {
            *totals.entry(stat.country_iso.as_str()).or_insert(0.0) += stat.quantity;
        }

        let mut rows: Vec<CountryTotal> = totals
            .into_iter()
            .map(|(iso, total_quantity)| CountryTotal {
                country_iso: iso.to_string(),
                country_name: snapshot
                    .country(iso)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                total_quantity,
            })
            .collect();

        rows.sort_by(|a, b| match b.total_quantity.total_cmp(&a.total_quantity) {
            Ordering::Equal => a.country_iso.cmp(&b.country_iso),
            other => other,
        });
        rows.truncate(limit);
        rows
    }

    /// 看板总览（顶部指标 + 领先榜）
    pub fn overview(&self, snapshot: &Snapshot, limit: usize) -> DashboardOverview {
        let total_gdp_billion_usd = snapshot
            .countries
            .values()
            .filter_map(|c| c.gdp_billion_usd)
            .sum();
        let total_mining_revenue_billion_usd = snapshot
            .countries
            .values()
            .filter_map(|c| c.mining_revenue_billion_usd)
            .sum();

        DashboardOverview {
            total_gdp_billion_usd,
            total_mining_revenue_billion_usd,
            counts: snapshot.counts(),
            top_minerals: self.top_minerals(snapshot, limit),
            top_countries: self.top_countries(snapshot, limit),
        }
    }

    /// 国家画像（基础指标 + 分矿种产量 + 矿区数）
    ///
    /// # 返回
    /// - Some(CountryProfile): 国家存在
    /// - None: 未知 ISO 代码（由 API 层转换为 NotFound）
    pub fn country_profile(&self, snapshot: &Snapshot, iso_code: &str) -> Option<CountryProfile> {
        let country = snapshot.country(iso_code)?;

        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for stat in snapshot.production.values() {
            if stat.country_iso == iso_code {
                *totals.entry(stat.mineral_code.as_str()).or_insert(0.0) += stat.quantity;
            }
        }

        let mut production_by_mineral: Vec<MineralTotal> = totals
            .into_iter()
            .map(|(code, total_quantity)| {
                let mineral = snapshot.mineral(code);
                MineralTotal {
                    mineral_code: code.to_string(),
                    mineral_name: mineral.map(|m| m.name.clone()).unwrap_or_default(),
                    unit: mineral
                        .map(|m| m.unit.clone())
                        .unwrap_or_else(|| crate::domain::DEFAULT_UNIT.to_string()),
                    total_quantity,
                }
            })
            .collect();
        production_by_mineral.sort_by(|a, b| {
            match b.total_quantity.total_cmp(&a.total_quantity) {
                Ordering::Equal => a.mineral_code.cmp(&b.mineral_code),
                other => other,
            }
        });

        let site_count = snapshot
            .sites
            .values()
            .filter(|s| s.country_iso == iso_code)
            .count();

        Some(CountryProfile {
            country_iso: country.iso_code.clone(),
            country_name: country.name.clone(),
            region: country.region.clone(),
            gdp_billion_usd: country.gdp_billion_usd,
            mining_revenue_billion_usd: country.mining_revenue_billion_usd,
            mining_share_pct: country.mining_share_pct(),
            key_projects: country.key_projects.clone(),
            production_by_mineral,
            site_count,
        })
    }

    /// 地图点位（可按矿种过滤；按矿区 ID 有序）
    ///
    /// 引用已在加载期校验，名称解析不会落空；
    /// 未知代码兜底为空串而非 panic。
    pub fn site_map_points(
        &self,
        snapshot: &Snapshot,
        mineral_filter: Option<&str>,
    ) -> Vec<SiteMapPoint> {
        snapshot
            .sites
            .values()
            .filter(|site| match mineral_filter {
                Some(code) => site.mineral_code == code,
                None => true,
            })
            .map(|site| SiteMapPoint {
                site_id: site.site_id.clone(),
                site_name: site.name.clone(),
                latitude: site.latitude,
                longitude: site.longitude,
                status: site.status,
                country_iso: site.country_iso.clone(),
                country_name: snapshot
                    .country(&site.country_iso)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                mineral_code: site.mineral_code.clone(),
                mineral_name: snapshot
                    .mineral(&site.mineral_code)
                    .map(|m| m.name.clone())
                    .unwrap_or_default(),
                output_tonnes: site.output_tonnes,
            })
            .collect()
    }
}

impl Default for OverviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

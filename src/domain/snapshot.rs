// ==========================================
// 非洲关键矿产数据看板 - 快照
// ==========================================
// 一次加载产出的全量实体集合，发布后只读
// 集合使用 BTreeMap（按键有序），保证排名/趋势输出确定性
// ==========================================

use crate::domain::country::Country;
use crate::domain::mineral::Mineral;
use crate::domain::production::{ProductionStat, StatKey};
use crate::domain::site::Site;
use crate::domain::user::{Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 表行数统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub countries: usize,
    pub minerals: usize,
    pub sites: usize,
    pub production_stats: usize,
    pub users: usize,
    pub roles: usize,
}

// ==========================================
// 快照元信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// 快照 ID（每次加载生成）
    pub snapshot_id: String,
    /// 加载完成时间
    pub loaded_at: DateTime<Utc>,
    /// 源数据目录
    pub source_dir: String,
    /// 各表行数
    pub counts: TableCounts,
}

// ==========================================
// Snapshot - 不可变实体快照
// ==========================================

/// 全量实体快照
///
/// 生命周期：由加载器一次性构建并完整校验后发布；
/// 发布后对查询会话只读，重载通过原子引用替换整体换新。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub countries: BTreeMap<String, Country>,
    pub minerals: BTreeMap<String, Mineral>,
    pub sites: BTreeMap<String, Site>,
    pub production: BTreeMap<StatKey, ProductionStat>,
    pub users: BTreeMap<String, User>,
    pub roles: BTreeMap<String, Role>,
}

impl Snapshot {
    /// 按 ISO 代码查国家
    pub fn country(&self, iso_code: &str) -> Option<&Country> {
        self.countries.get(iso_code)
    }

    /// 按代码查矿种
    pub fn mineral(&self, code: &str) -> Option<&Mineral> {
        self.minerals.get(code)
    }

    /// 按复合键查产量统计（键唯一，最多一条）
    pub fn production_stat(&self, country: &str, mineral: &str, year: i32) -> Option<&ProductionStat> {
        self.production
            .get(&StatKey::new(country, mineral, year))
    }

    /// 矿种计量单位（未知矿种返回 None）
    pub fn unit_of(&self, mineral_code: &str) -> Option<&str> {
        self.minerals.get(mineral_code).map(|m| m.unit.as_str())
    }

    /// 各表行数
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            countries: self.countries.len(),
            minerals: self.minerals.len(),
            sites: self.sites.len(),
            production_stats: self.production.len(),
            users: self.users.len(),
            roles: self.roles.len(),
        }
    }
}

// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 直接构建内存快照，绕过文件加载（引擎/API 测试用）
// ==========================================

#![allow(dead_code)]

use chrono::Utc;
use minerals_dashboard::domain::{
    Country, Mineral, ProductionStat, Role, Site, SiteStatus, Snapshot, SnapshotMeta, TableCounts,
    User,
};
use std::collections::BTreeMap;

// ==========================================
// Snapshot 构建器
// ==========================================

pub struct SnapshotBuilder {
    countries: BTreeMap<String, Country>,
    minerals: BTreeMap<String, Mineral>,
    sites: BTreeMap<String, Site>,
    production: BTreeMap<minerals_dashboard::domain::StatKey, ProductionStat>,
    users: BTreeMap<String, User>,
    roles: BTreeMap<String, Role>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            countries: BTreeMap::new(),
            minerals: BTreeMap::new(),
            sites: BTreeMap::new(),
            production: BTreeMap::new(),
            users: BTreeMap::new(),
            roles: BTreeMap::new(),
        }
    }

    pub fn country(mut self, iso: &str, name: &str) -> Self {
        self.countries.insert(
            iso.to_string(),
            Country {
                iso_code: iso.to_string(),
                name: name.to_string(),
                region: None,
                gdp_billion_usd: None,
                mining_revenue_billion_usd: None,
                key_projects: None,
            },
        );
        self
    }

    pub fn country_with_economy(
        mut self,
        iso: &str,
        name: &str,
        gdp: f64,
        mining_revenue: f64,
    ) -> Self {
        self.countries.insert(
            iso.to_string(),
            Country {
                iso_code: iso.to_string(),
                name: name.to_string(),
                region: None,
                gdp_billion_usd: Some(gdp),
                mining_revenue_billion_usd: Some(mining_revenue),
                key_projects: None,
            },
        );
        self
    }

    pub fn mineral(mut self, code: &str, name: &str) -> Self {
        self.minerals.insert(
            code.to_string(),
            Mineral {
                code: code.to_string(),
                name: name.to_string(),
                unit: "t".to_string(),
                description: None,
            },
        );
        self
    }

    pub fn site(mut self, site_id: &str, country: &str, mineral: &str, lat: f64, lon: f64) -> Self {
        self.sites.insert(
            site_id.to_string(),
            Site {
                site_id: site_id.to_string(),
                name: None,
                country_iso: country.to_string(),
                mineral_code: mineral.to_string(),
                latitude: lat,
                longitude: lon,
                status: SiteStatus::Active,
                output_tonnes: None,
            },
        );
        self
    }

    pub fn stat(mut self, country: &str, mineral: &str, year: i32, quantity: f64) -> Self {
        let stat = ProductionStat {
            country_iso: country.to_string(),
            mineral_code: mineral.to_string(),
            year,
            quantity,
            export_value_billion_usd: None,
            source: None,
        };
        self.production.insert(stat.key(), stat);
        self
    }

    pub fn role(mut self, role_id: &str, name: &str) -> Self {
        self.roles.insert(
            role_id.to_string(),
            Role {
                role_id: role_id.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn user(mut self, user_id: &str, username: &str, email: Option<&str>, role_id: &str) -> Self {
        self.users.insert(
            user_id.to_string(),
            User {
                user_id: user_id.to_string(),
                username: username.to_string(),
                email: email.map(|e| e.to_string()),
                role_id: role_id.to_string(),
                created_at: Some(Utc::now()),
            },
        );
        self
    }

    pub fn build(self) -> Snapshot {
        let counts = TableCounts {
            countries: self.countries.len(),
            minerals: self.minerals.len(),
            sites: self.sites.len(),
            production_stats: self.production.len(),
            users: self.users.len(),
            roles: self.roles.len(),
        };
        Snapshot {
            meta: SnapshotMeta {
                snapshot_id: "builder".to_string(),
                loaded_at: Utc::now(),
                source_dir: "<builder>".to_string(),
                counts,
            },
            countries: self.countries,
            minerals: self.minerals,
            sites: self.sites,
            production: self.production,
            users: self.users,
            roles: self.roles,
        }
    }
}

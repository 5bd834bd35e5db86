// ==========================================
// 非洲关键矿产数据看板 - 引用完整性校验器
// ==========================================
// 阶段 2: 主键唯一性 + 外键可解析性 + 取值范围
// 任一 ERROR 级违规使整次加载失败（不发布部分快照）
// ==========================================

use crate::domain::types::{SiteStatus, ValidationLevel};
use crate::domain::{
    RawCountryRecord, RawMineralRecord, RawProductionRecord, RawRoleRecord, RawSiteRecord,
    RawUserRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// 统计年份合理区间（区间外仅告警）
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

// ==========================================
// 校验违规记录
// ==========================================

/// 单条校验违规
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// 源文件名
    pub file: String,
    /// 源文件行号
    pub row_number: usize,
    /// 违规记录的键（可能缺失）
    pub record_key: Option<String>,
    /// 违规等级
    pub level: ValidationLevel,
    /// 违规字段
    pub field: String,
    /// 违规说明
    pub message: String,
}

impl ValidationViolation {
    /// 单行描述（用于错误消息与日志）
    pub fn describe(&self) -> String {
        format!(
            "[{}] {} 行 {} 字段 {}: {}",
            self.level, self.file, self.row_number, self.field, self.message
        )
    }
}

/// 校验汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

/// 校验报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: ValidationSummary,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationReport {
    /// 是否存在 ERROR 级违规（存在则加载失败）
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// 仅 WARNING/INFO 级违规（随加载报告返回）
    pub fn non_fatal(&self) -> Vec<ValidationViolation> {
        self.violations
            .iter()
            .filter(|v| v.level < ValidationLevel::Error)
            .cloned()
            .collect()
    }
}

// ==========================================
// ReferenceValidator - 引用完整性校验器
// ==========================================
pub struct ReferenceValidator {
    /// 坐标越界按 ERROR 处理（默认 WARNING——源数据坐标为近似值）
    strict_coordinates: bool,
}

impl ReferenceValidator {
    pub fn new(strict_coordinates: bool) -> Self {
        Self { strict_coordinates }
    }

    // ==========================================
    // 国家表
    // ==========================================

    /// 校验国家表（主键非空且唯一、名称非空）
    pub fn validate_countries(
        &self,
        file: &str,
        records: &[RawCountryRecord],
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let Some(iso) = record.iso_code.as_deref() else {
                violations.push(error(file, record.row_number, None, "CountryID", "主键缺失"));
                continue;
            };

            if !seen.insert(iso.to_string()) {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(iso),
                    "CountryID",
                    &format!("重复 ISO 代码: {}", iso),
                ));
            }

            if record.name.is_none() {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(iso),
                    "CountryName",
                    "国家名称缺失",
                ));
            }

            // 供给侧补充口径：负值无意义
            for (field, value) in [
                ("GDP_BillionUSD", record.gdp_billion_usd),
                ("MiningRevenue_BillionUSD", record.mining_revenue_billion_usd),
            ] {
                if let Some(v) = value {
                    if v < 0.0 {
                        violations.push(warning(
                            file,
                            record.row_number,
                            Some(iso),
                            field,
                            &format!("数值为负: {:.3}", v),
                        ));
                    }
                }
            }
        }

        violations
    }

    // ==========================================
    // 矿种表
    // ==========================================

    /// 校验矿种表（主键非空且唯一、名称非空、缺单位告警）
    pub fn validate_minerals(
        &self,
        file: &str,
        records: &[RawMineralRecord],
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let Some(code) = record.code.as_deref() else {
                violations.push(error(file, record.row_number, None, "MineralID", "主键缺失"));
                continue;
            };

            if !seen.insert(code.to_string()) {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(code),
                    "MineralID",
                    &format!("重复矿种代码: {}", code),
                ));
            }

            if record.name.is_none() {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(code),
                    "MineralName",
                    "矿种名称缺失",
                ));
            }

            if record.unit.is_none() {
                violations.push(ValidationViolation {
                    file: file.to_string(),
                    row_number: record.row_number,
                    record_key: Some(code.to_string()),
                    level: ValidationLevel::Warning,
                    field: "Unit".to_string(),
                    message: format!(
                        "计量单位缺失，使用默认值 {}",
                        crate::domain::DEFAULT_UNIT
                    ),
                });
            }
        }

        violations
    }

    // ==========================================
    // 矿区表
    // ==========================================

    /// 校验矿区表（主键、外键可解析、状态合法、坐标范围）
    pub fn validate_sites(
        &self,
        file: &str,
        records: &[RawSiteRecord],
        countries: &BTreeSet<String>,
        minerals: &BTreeSet<String>,
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let Some(site_id) = record.site_id.as_deref() else {
                violations.push(error(file, record.row_number, None, "SiteID", "主键缺失"));
                continue;
            };

            if !seen.insert(site_id.to_string()) {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "SiteID",
                    &format!("重复矿区 ID: {}", site_id),
                ));
            }

            // 外键: 国家
            match record.country_iso.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "CountryID",
                    "国家引用缺失",
                )),
                Some(iso) if !countries.contains(iso) => violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "CountryID",
                    &format!("引用的国家不存在: {}", iso),
                )),
                _ => {}
            }

            // 外键: 矿种
            match record.mineral_code.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "MineralID",
                    "矿种引用缺失",
                )),
                Some(code) if !minerals.contains(code) => violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "MineralID",
                    &format!("引用的矿种不存在: {}", code),
                )),
                _ => {}
            }

            // 状态
            match record.status.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "Status",
                    "矿区状态缺失",
                )),
                Some(s) if SiteStatus::from_str(s).is_none() => violations.push(error(
                    file,
                    record.row_number,
                    Some(site_id),
                    "Status",
                    &format!("未知矿区状态: {}（可选: ACTIVE/INACTIVE/PLANNED）", s),
                )),
                _ => {}
            }

            // 坐标
            self.check_coordinate(file, record, site_id, &mut violations);

            // 年产量
            if let Some(output) = record.output_tonnes {
                if output < 0.0 {
                    violations.push(error(
                        file,
                        record.row_number,
                        Some(site_id),
                        "Production_tonnes",
                        &format!("产量为负: {:.3}", output),
                    ));
                }
            }
        }

        violations
    }

    fn check_coordinate(
        &self,
        file: &str,
        record: &RawSiteRecord,
        site_id: &str,
        violations: &mut Vec<ValidationViolation>,
    ) {
        let coord_level = if self.strict_coordinates {
            ValidationLevel::Error
        } else {
            ValidationLevel::Warning
        };

        match record.latitude {
            None => violations.push(error(
                file,
                record.row_number,
                Some(site_id),
                "Latitude",
                "纬度缺失",
            )),
            Some(lat) if !(-90.0..=90.0).contains(&lat) => {
                violations.push(ValidationViolation {
                    file: file.to_string(),
                    row_number: record.row_number,
                    record_key: Some(site_id.to_string()),
                    level: coord_level,
                    field: "Latitude".to_string(),
                    message: format!("纬度超出范围 [-90, 90]: {}", lat),
                });
            }
            _ => {}
        }

        match record.longitude {
            None => violations.push(error(
                file,
                record.row_number,
                Some(site_id),
                "Longitude",
                "经度缺失",
            )),
            Some(lon) if !(-180.0..=180.0).contains(&lon) => {
                violations.push(ValidationViolation {
                    file: file.to_string(),
                    row_number: record.row_number,
                    record_key: Some(site_id.to_string()),
                    level: coord_level,
                    field: "Longitude".to_string(),
                    message: format!("经度超出范围 [-180, 180]: {}", lon),
                });
            }
            _ => {}
        }
    }

    // ==========================================
    // 产量统计表
    // ==========================================

    /// 校验产量统计表（外键、复合键唯一、数量非负、年份区间告警）
    pub fn validate_production(
        &self,
        file: &str,
        records: &[RawProductionRecord],
        countries: &BTreeSet<String>,
        minerals: &BTreeSet<String>,
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();
        let mut seen_keys: HashSet<(String, String, i32)> = HashSet::new();

        for record in records {
            let key_desc = format!(
                "({}, {}, {})",
                record.country_iso.as_deref().unwrap_or("?"),
                record.mineral_code.as_deref().unwrap_or("?"),
                record
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "?".to_string()),
            );

            // 外键: 国家
            match record.country_iso.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "CountryID",
                    "国家引用缺失",
                )),
                Some(iso) if !countries.contains(iso) => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "CountryID",
                    &format!("引用的国家不存在: {}", iso),
                )),
                _ => {}
            }

            // 外键: 矿种
            match record.mineral_code.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "MineralID",
                    "矿种引用缺失",
                )),
                Some(code) if !minerals.contains(code) => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "MineralID",
                    &format!("引用的矿种不存在: {}", code),
                )),
                _ => {}
            }

            // 年份
            match record.year {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "Year",
                    "统计年份缺失",
                )),
                Some(year) if !(YEAR_MIN..=YEAR_MAX).contains(&year) => {
                    violations.push(warning(
                        file,
                        record.row_number,
                        Some(key_desc.as_str()),
                        "Year",
                        &format!("年份超出区间 [{}, {}]: {}", YEAR_MIN, YEAR_MAX, year),
                    ));
                }
                _ => {}
            }

            // 数量非负
            match record.quantity {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "Production_tonnes",
                    "产量缺失",
                )),
                Some(q) if q < 0.0 => violations.push(error(
                    file,
                    record.row_number,
                    Some(key_desc.as_str()),
                    "Production_tonnes",
                    &format!("产量为负: {:.3}", q),
                )),
                _ => {}
            }

            // 复合键唯一（仅当三段齐全时可判定）
            if let (Some(iso), Some(code), Some(year)) = (
                record.country_iso.as_ref(),
                record.mineral_code.as_ref(),
                record.year,
            ) {
                if !seen_keys.insert((iso.clone(), code.clone(), year)) {
                    violations.push(error(
                        file,
                        record.row_number,
                        Some(key_desc.as_str()),
                        "CountryID,MineralID,Year",
                        &format!("重复复合键: {}", key_desc),
                    ));
                }
            }
        }

        violations
    }

    // ==========================================
    // 角色 / 用户表
    // ==========================================

    /// 校验角色表（主键非空且唯一、名称非空）
    pub fn validate_roles(
        &self,
        file: &str,
        records: &[RawRoleRecord],
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let Some(role_id) = record.role_id.as_deref() else {
                violations.push(error(file, record.row_number, None, "RoleID", "主键缺失"));
                continue;
            };

            if !seen.insert(role_id.to_string()) {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(role_id),
                    "RoleID",
                    &format!("重复角色 ID: {}", role_id),
                ));
            }

            if record.name.is_none() {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(role_id),
                    "RoleName",
                    "角色名称缺失",
                ));
            }
        }

        violations
    }

    /// 校验用户表（主键与用户名唯一、角色引用可解析、缺邮箱仅提示）
    pub fn validate_users(
        &self,
        file: &str,
        records: &[RawUserRecord],
        roles: &BTreeSet<String>,
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();

        for record in records {
            let Some(user_id) = record.user_id.as_deref() else {
                violations.push(error(file, record.row_number, None, "UserID", "主键缺失"));
                continue;
            };

            if !seen_ids.insert(user_id.to_string()) {
                violations.push(error(
                    file,
                    record.row_number,
                    Some(user_id),
                    "UserID",
                    &format!("重复用户 ID: {}", user_id),
                ));
            }

            match record.username.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(user_id),
                    "Username",
                    "用户名缺失",
                )),
                Some(name) => {
                    if !seen_names.insert(name.to_string()) {
                        violations.push(error(
                            file,
                            record.row_number,
                            Some(user_id),
                            "Username",
                            &format!("重复用户名: {}", name),
                        ));
                    }
                }
            }

            // 外键: 角色
            match record.role_id.as_deref() {
                None => violations.push(error(
                    file,
                    record.row_number,
                    Some(user_id),
                    "RoleID",
                    "角色引用缺失",
                )),
                Some(role_id) if !roles.contains(role_id) => violations.push(error(
                    file,
                    record.row_number,
                    Some(user_id),
                    "RoleID",
                    &format!("引用的角色不存在: {}", role_id),
                )),
                _ => {}
            }

            if record.email.is_none() {
                violations.push(ValidationViolation {
                    file: file.to_string(),
                    row_number: record.row_number,
                    record_key: Some(user_id.to_string()),
                    level: ValidationLevel::Info,
                    field: "Email".to_string(),
                    message: "邮箱缺失".to_string(),
                });
            }
        }

        violations
    }

    // ==========================================
    // 报告生成
    // ==========================================

    /// 汇总违规列表为校验报告
    pub fn generate_report(&self, violations: Vec<ValidationViolation>) -> ValidationReport {
        let errors = violations
            .iter()
            .filter(|v| v.level == ValidationLevel::Error)
            .count();
        let warnings = violations
            .iter()
            .filter(|v| v.level == ValidationLevel::Warning)
            .count();
        let infos = violations
            .iter()
            .filter(|v| v.level == ValidationLevel::Info)
            .count();

        ValidationReport {
            summary: ValidationSummary {
                errors,
                warnings,
                infos,
            },
            violations,
        }
    }
}

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new(false)
    }
}

// ==========================================
// 违规构造辅助
// ==========================================

fn error(
    file: &str,
    row_number: usize,
    record_key: Option<&str>,
    field: &str,
    message: &str,
) -> ValidationViolation {
    ValidationViolation {
        file: file.to_string(),
        row_number,
        record_key: record_key.map(|k| k.to_string()),
        level: ValidationLevel::Error,
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn warning(
    file: &str,
    row_number: usize,
    record_key: Option<&str>,
    field: &str,
    message: &str,
) -> ValidationViolation {
    ValidationViolation {
        file: file.to_string(),
        row_number,
        record_key: record_key.map(|k| k.to_string()),
        level: ValidationLevel::Warning,
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> BTreeSet<String> {
        ["CD", "ZM"].iter().map(|s| s.to_string()).collect()
    }

    fn minerals() -> BTreeSet<String> {
        ["CO", "CU"].iter().map(|s| s.to_string()).collect()
    }

    fn site(site_id: &str, country: &str, mineral: &str) -> RawSiteRecord {
        RawSiteRecord {
            site_id: Some(site_id.to_string()),
            name: Some("Test Site".to_string()),
            country_iso: Some(country.to_string()),
            mineral_code: Some(mineral.to_string()),
            latitude: Some(-10.7),
            longitude: Some(25.5),
            status: Some("ACTIVE".to_string()),
            output_tonnes: Some(1000.0),
            row_number: 2,
        }
    }

    fn stat(country: &str, mineral: &str, year: i32, quantity: f64) -> RawProductionRecord {
        RawProductionRecord {
            country_iso: Some(country.to_string()),
            mineral_code: Some(mineral.to_string()),
            year: Some(year),
            quantity: Some(quantity),
            export_value_billion_usd: None,
            source: None,
            row_number: 2,
        }
    }

    #[test]
    fn test_validate_sites_dangling_country() {
        let validator = ReferenceValidator::default();
        let violations =
            validator.validate_sites("sites.csv", &[site("S1", "XX", "CO")], &countries(), &minerals());

        assert!(violations
            .iter()
            .any(|v| v.level == ValidationLevel::Error
                && v.field == "CountryID"
                && v.message.contains("XX")));
    }

    #[test]
    fn test_validate_sites_coordinates_warning_by_default() {
        let validator = ReferenceValidator::default();
        let mut record = site("S1", "CD", "CO");
        record.latitude = Some(120.0);

        let violations =
            validator.validate_sites("sites.csv", &[record], &countries(), &minerals());

        assert!(violations
            .iter()
            .any(|v| v.field == "Latitude" && v.level == ValidationLevel::Warning));
    }

    #[test]
    fn test_validate_sites_coordinates_strict_mode() {
        let validator = ReferenceValidator::new(true);
        let mut record = site("S1", "CD", "CO");
        record.longitude = Some(200.0);

        let violations =
            validator.validate_sites("sites.csv", &[record], &countries(), &minerals());

        assert!(violations
            .iter()
            .any(|v| v.field == "Longitude" && v.level == ValidationLevel::Error));
    }

    #[test]
    fn test_validate_production_duplicate_key() {
        let validator = ReferenceValidator::default();
        let mut second = stat("CD", "CO", 2023, 5.0);
        second.row_number = 3;
        let violations = validator.validate_production(
            "production_stats.csv",
            &[stat("CD", "CO", 2023, 170000.0), second],
            &countries(),
            &minerals(),
        );

        let dup: Vec<_> = violations
            .iter()
            .filter(|v| v.message.contains("重复复合键"))
            .collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].row_number, 3);
    }

    #[test]
    fn test_validate_production_negative_quantity() {
        let validator = ReferenceValidator::default();
        let violations = validator.validate_production(
            "production_stats.csv",
            &[stat("CD", "CO", 2023, -1.0)],
            &countries(),
            &minerals(),
        );

        assert!(violations
            .iter()
            .any(|v| v.field == "Production_tonnes" && v.level == ValidationLevel::Error));
    }

    #[test]
    fn test_validate_users_dangling_role() {
        let validator = ReferenceValidator::default();
        let roles: BTreeSet<String> = ["R1"].iter().map(|s| s.to_string()).collect();
        let record = RawUserRecord {
            user_id: Some("1".to_string()),
            username: Some("admin".to_string()),
            email: Some("admin@minerals.local".to_string()),
            role_id: Some("R9".to_string()),
            created_at: None,
            row_number: 2,
        };

        let violations = validator.validate_users("users.csv", &[record], &roles);

        assert!(violations
            .iter()
            .any(|v| v.field == "RoleID" && v.message.contains("R9")));
    }

    #[test]
    fn test_generate_report_counts_levels() {
        let validator = ReferenceValidator::default();
        let violations = vec![
            error("a.csv", 2, None, "X", "e"),
            warning("a.csv", 3, None, "Y", "w"),
            warning("a.csv", 4, None, "Y", "w"),
        ];
        let report = validator.generate_report(violations);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.warnings, 2);
        assert!(report.has_errors());
        assert_eq!(report.non_fatal().len(), 2);
    }
}

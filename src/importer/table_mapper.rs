// ==========================================
// 非洲关键矿产数据看板 - 表字段映射器
// ==========================================
// 阶段 1: 源列名 → 标准字段映射 + 类型转换
// 列名兼容: 同一字段接受若干常见别名
// ==========================================

use crate::domain::{
    RawCountryRecord, RawMineralRecord, RawProductionRecord, RawRoleRecord, RawSiteRecord,
    RawUserRecord,
};
use crate::importer::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;

pub struct TableMapper;

impl TableMapper {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 必需列检查
    // ==========================================

    /// 检查表头是否覆盖所有必需字段（按别名匹配）
    ///
    /// 空表（无数据行）直接通过——此时没有可失败的行。
    pub fn check_required_columns(
        &self,
        file: &str,
        rows: &[HashMap<String, String>],
        required: &[&str],
    ) -> Result<(), ParseError> {
        let Some(first) = rows.first() else {
            return Ok(());
        };

        for key in required {
            let found = Self::aliases(key)
                .iter()
                .any(|alias| first.contains_key(*alias));
            if !found {
                return Err(ParseError::MissingColumn {
                    file: file.to_string(),
                    column: (*key).to_string(),
                });
            }
        }
        Ok(())
    }

    // ==========================================
    // 各表映射
    // ==========================================

    /// 国家表行 → RawCountryRecord
    pub fn map_country(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawCountryRecord, ParseError> {
        Ok(RawCountryRecord {
            iso_code: self.get_string(row, "CountryID").map(|s| s.to_uppercase()),
            name: self.get_string(row, "CountryName"),
            region: self.get_string(row, "Region"),
            gdp_billion_usd: self.parse_f64(file, row, "GDP_BillionUSD", row_number)?,
            mining_revenue_billion_usd: self.parse_f64(
                file,
                row,
                "MiningRevenue_BillionUSD",
                row_number,
            )?,
            key_projects: self.get_string(row, "KeyProjects"),
            row_number,
        })
    }

    /// 矿种表行 → RawMineralRecord
    pub fn map_mineral(
        &self,
        _file: &str,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawMineralRecord, ParseError> {
        Ok(RawMineralRecord {
            code: self.get_string(row, "MineralID").map(|s| s.to_uppercase()),
            name: self.get_string(row, "MineralName"),
            unit: self.get_string(row, "Unit"),
            description: self.get_string(row, "Description"),
            row_number,
        })
    }

    /// 矿区表行 → RawSiteRecord
    pub fn map_site(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawSiteRecord, ParseError> {
        Ok(RawSiteRecord {
            site_id: self.get_string(row, "SiteID"),
            name: self.get_string(row, "SiteName"),
            country_iso: self.get_string(row, "CountryID").map(|s| s.to_uppercase()),
            mineral_code: self.get_string(row, "MineralID").map(|s| s.to_uppercase()),
            latitude: self.parse_f64(file, row, "Latitude", row_number)?,
            longitude: self.parse_f64(file, row, "Longitude", row_number)?,
            status: self.get_string(row, "Status"),
            output_tonnes: self.parse_f64(file, row, "Production_tonnes", row_number)?,
            row_number,
        })
    }

    /// 产量统计表行 → RawProductionRecord
    pub fn map_production(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawProductionRecord, ParseError> {
        Ok(RawProductionRecord {
            country_iso: self.get_string(row, "CountryID").map(|s| s.to_uppercase()),
            mineral_code: self.get_string(row, "MineralID").map(|s| s.to_uppercase()),
            year: self.parse_i32(file, row, "Year", row_number)?,
            quantity: self.parse_f64(file, row, "Production_tonnes", row_number)?,
            export_value_billion_usd: self.parse_f64(
                file,
                row,
                "ExportValue_BillionUSD",
                row_number,
            )?,
            source: self.get_string(row, "Source"),
            row_number,
        })
    }

    /// 用户表行 → RawUserRecord
    pub fn map_user(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawUserRecord, ParseError> {
        Ok(RawUserRecord {
            user_id: self.get_string(row, "UserID"),
            username: self.get_string(row, "Username"),
            email: self.get_string(row, "Email"),
            role_id: self.get_string(row, "RoleID"),
            created_at: self.parse_datetime(file, row, "CreatedAt", row_number)?,
            row_number,
        })
    }

    /// 角色表行 → RawRoleRecord
    pub fn map_role(
        &self,
        _file: &str,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Result<RawRoleRecord, ParseError> {
        Ok(RawRoleRecord {
            role_id: self.get_string(row, "RoleID"),
            name: self.get_string(row, "RoleName"),
            row_number,
        })
    }

    // ==========================================
    // 解析辅助
    // ==========================================

    /// 字段别名表（源文件列名的常见变体）
    fn aliases(key: &str) -> Vec<&str> {
        match key {
            "CountryID" => vec!["CountryID", "ISO", "ISOCode", "country_id"],
            "CountryName" => vec!["CountryName", "country_name"],
            "Region" => vec!["Region", "region"],
            "MineralID" => vec!["MineralID", "MineralCode", "mineral_id"],
            "MineralName" => vec!["MineralName", "mineral_name"],
            "Unit" => vec!["Unit", "UnitOfMeasure", "unit"],
            "SiteID" => vec!["SiteID", "site_id"],
            "SiteName" => vec!["SiteName", "site_name"],
            "Latitude" => vec!["Latitude", "Lat"],
            "Longitude" => vec!["Longitude", "Lon", "Lng"],
            "Status" => vec!["Status", "SiteStatus", "status"],
            "Production_tonnes" => vec!["Production_tonnes", "Quantity", "production_tonnes"],
            "Year" => vec!["Year", "year"],
            "ExportValue_BillionUSD" => vec!["ExportValue_BillionUSD", "ExportValue"],
            "Source" => vec!["Source", "Citation", "source"],
            "UserID" => vec!["UserID", "user_id", "id"],
            "Username" => vec!["Username", "username"],
            "Email" => vec!["Email", "email"],
            "RoleID" => vec!["RoleID", "role_id", "Role"],
            "RoleName" => vec!["RoleName", "role_name"],
            "CreatedAt" => vec!["CreatedAt", "created_at"],
            _ => vec![key],
        }
    }

    /// 提取字符串字段（返回 Option），支持别名
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in Self::aliases(key) {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析浮点数
    fn parse_f64(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Result<Option<f64>, ParseError> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value.parse::<f64>().map(Some).map_err(|_| {
                ParseError::TypeConversionError {
                    file: file.to_string(),
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }
            }),
        }
    }

    /// 解析整数
    fn parse_i32(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Result<Option<i32>, ParseError> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value.parse::<i32>().map(Some).map_err(|_| {
                ParseError::TypeConversionError {
                    file: file.to_string(),
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为整数: {}", value),
                }
            }),
        }
    }

    /// 解析时间（RFC3339，兼容 "YYYY-MM-DD HH:MM:SS" 与无时区 ISO 格式）
    fn parse_datetime(
        &self,
        file: &str,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Result<Option<DateTime<Utc>>, ParseError> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => DateTime::parse_from_rfc3339(&value)
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S%.f")
                        .map(|naive| naive.and_utc())
                })
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S")
                        .map(|naive| naive.and_utc())
                })
                .map(Some)
                .map_err(|_| ParseError::TypeConversionError {
                    file: file.to_string(),
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为时间: {}", value),
                }),
        }
    }
}

impl Default for TableMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_country_uppercases_iso() {
        let mapper = TableMapper::new();
        let record = mapper
            .map_country(
                "countries.csv",
                &row(&[
                    ("CountryID", "cd"),
                    ("CountryName", "DR Congo"),
                    ("GDP_BillionUSD", "64.0"),
                ]),
                2,
            )
            .unwrap();
        assert_eq!(record.iso_code.as_deref(), Some("CD"));
        assert_eq!(record.gdp_billion_usd, Some(64.0));
        assert_eq!(record.row_number, 2);
    }

    #[test]
    fn test_map_production_bad_quantity_is_parse_error() {
        let mapper = TableMapper::new();
        let result = mapper.map_production(
            "production_stats.csv",
            &row(&[
                ("CountryID", "CD"),
                ("MineralID", "CO"),
                ("Year", "2023"),
                ("Production_tonnes", "abc"),
            ]),
            5,
        );
        match result {
            Err(ParseError::TypeConversionError { file, row, field, .. }) => {
                assert_eq!(file, "production_stats.csv");
                assert_eq!(row, 5);
                assert_eq!(field, "Production_tonnes");
            }
            other => panic!("Expected TypeConversionError, got {:?}", other),
        }
    }

    #[test]
    fn test_map_site_accepts_alias_columns() {
        let mapper = TableMapper::new();
        let record = mapper
            .map_site(
                "sites.csv",
                &row(&[
                    ("SiteID", "S1"),
                    ("CountryID", "cd"),
                    ("MineralID", "co"),
                    ("Lat", "-10.7"),
                    ("Lon", "25.5"),
                    ("Status", "ACTIVE"),
                ]),
                2,
            )
            .unwrap();
        assert_eq!(record.latitude, Some(-10.7));
        assert_eq!(record.longitude, Some(25.5));
        assert_eq!(record.mineral_code.as_deref(), Some("CO"));
    }

    #[test]
    fn test_check_required_columns_missing() {
        let mapper = TableMapper::new();
        let rows = vec![row(&[("CountryID", "CD"), ("MineralID", "CO")])];
        let result =
            mapper.check_required_columns("production_stats.csv", &rows, &["Year"]);
        assert!(matches!(result, Err(ParseError::MissingColumn { .. })));
    }

    #[test]
    fn test_check_required_columns_empty_table_ok() {
        let mapper = TableMapper::new();
        let rows: Vec<HashMap<String, String>> = Vec::new();
        assert!(mapper
            .check_required_columns("countries.csv", &rows, &["CountryID"])
            .is_ok());
    }

    #[test]
    fn test_map_user_parses_created_at() {
        let mapper = TableMapper::new();
        let record = mapper
            .map_user(
                "users.csv",
                &row(&[
                    ("UserID", "1"),
                    ("Username", "admin"),
                    ("RoleID", "R1"),
                    ("CreatedAt", "2025-11-02T09:30:00"),
                ]),
                2,
            )
            .unwrap();
        assert!(record.created_at.is_some());
    }
}

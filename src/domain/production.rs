// ==========================================
// 非洲关键矿产数据看板 - 产量统计实体
// ==========================================
// 复合主键: (国家, 矿种, 年份)，加载时必须唯一
// 数量非负，单位以矿种 unit 为准
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// StatKey - 产量统计复合键
// ==========================================
// BTreeMap 键序即 (国家, 矿种, 年份) 字典序，保证聚合输出确定性
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatKey {
    /// 国家 ISO 代码
    pub country: String,
    /// 矿种代码
    pub mineral: String,
    /// 统计年份
    pub year: i32,
}

impl StatKey {
    pub fn new(country: impl Into<String>, mineral: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            mineral: mineral.into(),
            year,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.country, self.mineral, self.year)
    }
}

// ==========================================
// ProductionStat - 产量统计
// ==========================================

/// 年度产量统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionStat {
    /// 国家 ISO 代码
    pub country_iso: String,
    /// 矿种代码
    pub mineral_code: String,
    /// 统计年份
    pub year: i32,
    /// 产量（单位以矿种 unit 为准，非负）
    pub quantity: f64,
    /// 出口额（十亿美元，可选补充口径）
    pub export_value_billion_usd: Option<f64>,
    /// 数据来源引用（自由文本）
    pub source: Option<String>,
}

impl ProductionStat {
    /// 该条统计的复合键
    pub fn key(&self) -> StatKey {
        StatKey::new(
            self.country_iso.clone(),
            self.mineral_code.clone(),
            self.year,
        )
    }
}

// ==========================================
// 导入中间结构
// ==========================================

/// 产量统计表原始行记录（字段映射输出，未经校验）
#[derive(Debug, Clone, Default)]
pub struct RawProductionRecord {
    pub country_iso: Option<String>,
    pub mineral_code: Option<String>,
    pub year: Option<i32>,
    pub quantity: Option<f64>,
    pub export_value_billion_usd: Option<f64>,
    pub source: Option<String>,
    /// 源文件行号（用于校验报告）
    pub row_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_key_ordering() {
        // 键序: 国家 → 矿种 → 年份
        let a = StatKey::new("CD", "CO", 2023);
        let b = StatKey::new("CD", "CU", 2021);
        let c = StatKey::new("ZM", "CO", 2020);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_stat_key_display() {
        let key = StatKey::new("CD", "CO", 2023);
        assert_eq!(key.to_string(), "(CD, CO, 2023)");
    }
}

// ==========================================
// 非洲关键矿产数据看板 - 查询过滤条件
// ==========================================
// 显式可枚举的可选约束组合；字段缺省即"不过滤"
// 合法性校验（代码可解析）在 API 层针对活动快照执行
// ==========================================

use crate::domain::production::StatKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// YearRange - 年份区间（闭区间）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// 区间是否为空（start > end，属非法输入）
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

// ==========================================
// QueryFilter - 查询过滤条件
// ==========================================

/// 查询过滤条件
///
/// 三个维度各自可选：国家集合、矿种集合、年份区间。
/// 代码在构建时统一大写，与快照键口径一致。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub countries: Option<BTreeSet<String>>,
    pub minerals: Option<BTreeSet<String>>,
    pub years: Option<YearRange>,
}

impl QueryFilter {
    /// 无过滤条件（匹配全部）
    pub fn new() -> Self {
        Self::default()
    }

    /// 限定国家集合
    pub fn with_countries<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.countries = Some(
            codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_uppercase())
                .collect(),
        );
        self
    }

    /// 限定矿种集合
    pub fn with_minerals<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.minerals = Some(
            codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_uppercase())
                .collect(),
        );
        self
    }

    /// 限定年份区间（闭区间）
    pub fn with_years(mut self, start: i32, end: i32) -> Self {
        self.years = Some(YearRange::new(start, end));
        self
    }

    /// 判断一条产量统计键是否通过过滤
    pub fn matches(&self, key: &StatKey) -> bool {
        if let Some(countries) = &self.countries {
            if !countries.contains(&key.country) {
                return false;
            }
        }
        if let Some(minerals) = &self.minerals {
            if !minerals.contains(&key.mineral) {
                return false;
            }
        }
        if let Some(years) = &self.years {
            if !years.contains(key.year) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = QueryFilter::new();
        assert!(filter.matches(&StatKey::new("CD", "CO", 2023)));
    }

    #[test]
    fn test_filter_normalizes_codes_to_uppercase() {
        let filter = QueryFilter::new().with_countries(["cd"]).with_minerals(["co"]);
        assert!(filter.matches(&StatKey::new("CD", "CO", 2023)));
        assert!(!filter.matches(&StatKey::new("ZM", "CO", 2023)));
    }

    #[test]
    fn test_filter_year_range_is_inclusive() {
        let filter = QueryFilter::new().with_years(2021, 2023);
        assert!(filter.matches(&StatKey::new("CD", "CO", 2021)));
        assert!(filter.matches(&StatKey::new("CD", "CO", 2023)));
        assert!(!filter.matches(&StatKey::new("CD", "CO", 2024)));
    }

    #[test]
    fn test_year_range_empty() {
        assert!(YearRange::new(2024, 2020).is_empty());
        assert!(!YearRange::new(2020, 2020).is_empty());
    }
}

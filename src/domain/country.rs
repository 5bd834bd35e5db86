// ==========================================
// 非洲关键矿产数据看板 - 国家实体
// ==========================================
// 主键: ISO 代码（加载时统一大写）
// 加载后不可变
// ==========================================

use serde::{Deserialize, Serialize};

/// 国家主数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 代码（唯一键）
    pub iso_code: String,
    /// 国家名称
    pub name: String,
    /// 地理区域（如 "Central Africa"）
    pub region: Option<String>,
    /// GDP（十亿美元）
    pub gdp_billion_usd: Option<f64>,
    /// 矿业收入（十亿美元）
    pub mining_revenue_billion_usd: Option<f64>,
    /// 重点项目（自由文本）
    pub key_projects: Option<String>,
}

impl Country {
    /// 矿业收入占 GDP 比例（百分比）
    ///
    /// # 返回
    /// - Some(f64): 两项数据齐全且 GDP > 0
    /// - None: 数据缺失或 GDP 非正
    pub fn mining_share_pct(&self) -> Option<f64> {
        match (self.mining_revenue_billion_usd, self.gdp_billion_usd) {
            (Some(rev), Some(gdp)) if gdp > 0.0 => Some(rev / gdp * 100.0),
            _ => None,
        }
    }
}

// ==========================================
// 导入中间结构
// ==========================================

/// 国家表原始行记录（字段映射输出，未经校验）
#[derive(Debug, Clone, Default)]
pub struct RawCountryRecord {
    pub iso_code: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub gdp_billion_usd: Option<f64>,
    pub mining_revenue_billion_usd: Option<f64>,
    pub key_projects: Option<String>,
    /// 源文件行号（用于校验报告）
    pub row_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mining_share_pct() {
        let c = Country {
            iso_code: "CD".to_string(),
            name: "DR Congo".to_string(),
            region: Some("Central Africa".to_string()),
            gdp_billion_usd: Some(64.0),
            mining_revenue_billion_usd: Some(16.0),
            key_projects: None,
        };
        assert_eq!(c.mining_share_pct(), Some(25.0));
    }

    #[test]
    fn test_mining_share_pct_missing_gdp() {
        let c = Country {
            iso_code: "ZM".to_string(),
            name: "Zambia".to_string(),
            region: None,
            gdp_billion_usd: None,
            mining_revenue_billion_usd: Some(5.0),
            key_projects: None,
        };
        assert_eq!(c.mining_share_pct(), None);
    }
}

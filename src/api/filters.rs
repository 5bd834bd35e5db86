// ==========================================
// 非洲关键矿产数据看板 - 过滤条件校验
// ==========================================
// 职责: 针对活动快照校验调用方过滤条件
// 约定: 合法但无匹配 → 空结果集; 引用未知代码 → InvalidFilterError
// ==========================================

use crate::api::error::InvalidFilterError;
use crate::domain::{QueryFilter, Snapshot};

/// 校验过滤条件
///
/// # 校验项
/// 1. 年份区间 start <= end
/// 2. 国家集合中的每个代码在快照中存在
/// 3. 矿种集合中的每个代码在快照中存在
///
/// # 返回
/// - Ok(()): 过滤条件合法（可能匹配零条记录）
/// - Err(InvalidFilterError): 首个不可解析/不一致的条件
pub fn validate_filter(filter: &QueryFilter, snapshot: &Snapshot) -> Result<(), InvalidFilterError> {
    if let Some(years) = &filter.years {
        if years.is_empty() {
            return Err(InvalidFilterError::EmptyYearRange {
                start: years.start,
                end: years.end,
            });
        }
    }

    if let Some(countries) = &filter.countries {
        for iso in countries {
            if snapshot.country(iso).is_none() {
                return Err(InvalidFilterError::UnknownCountryCode(iso.clone()));
            }
        }
    }

    if let Some(minerals) = &filter.minerals {
        for code in minerals {
            if snapshot.mineral(code).is_none() {
                return Err(InvalidFilterError::UnknownMineralCode(code.clone()));
            }
        }
    }

    Ok(())
}

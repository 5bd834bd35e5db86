// ==========================================
// 非洲关键矿产数据看板 - 矿区实体
// ==========================================
// 主键: 矿区 ID
// 外键: 国家 ISO 代码 / 矿种代码（加载时必须可解析）
// 坐标为近似值（源数据声明，运营前需替换）
// ==========================================

use crate::domain::types::SiteStatus;
use serde::{Deserialize, Serialize};

/// 矿区主数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// 矿区 ID（唯一键）
    pub site_id: String,
    /// 矿区名称
    pub name: Option<String>,
    /// 所属国家（ISO 代码）
    pub country_iso: String,
    /// 开采矿种（矿种代码）
    pub mineral_code: String,
    /// 近似纬度
    pub latitude: f64,
    /// 近似经度
    pub longitude: f64,
    /// 矿区状态
    pub status: SiteStatus,
    /// 年产量（吨，可选补充口径）
    pub output_tonnes: Option<f64>,
}

// ==========================================
// 导入中间结构
// ==========================================

/// 矿区表原始行记录（字段映射输出，未经校验）
#[derive(Debug, Clone, Default)]
pub struct RawSiteRecord {
    pub site_id: Option<String>,
    pub name: Option<String>,
    pub country_iso: Option<String>,
    pub mineral_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<String>,
    pub output_tonnes: Option<f64>,
    /// 源文件行号（用于校验报告）
    pub row_number: usize,
}

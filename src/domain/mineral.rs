// ==========================================
// 非洲关键矿产数据看板 - 矿种实体
// ==========================================
// 主键: 矿种代码（加载时统一大写）
// 加载后不可变
// ==========================================

use serde::{Deserialize, Serialize};

/// 计量单位缺失时的默认值（吨）
pub const DEFAULT_UNIT: &str = "t";

/// 矿种主数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mineral {
    /// 矿种代码（唯一键，如 "CO" 钴）
    pub code: String,
    /// 矿种名称
    pub name: String,
    /// 计量单位（产量数值的口径）
    pub unit: String,
    /// 描述（自由文本）
    pub description: Option<String>,
}

// ==========================================
// 导入中间结构
// ==========================================

/// 矿种表原始行记录（字段映射输出，未经校验）
#[derive(Debug, Clone, Default)]
pub struct RawMineralRecord {
    pub code: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    /// 源文件行号（用于校验报告）
    pub row_number: usize,
}

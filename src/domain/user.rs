// ==========================================
// 非洲关键矿产数据看板 - 用户与角色实体
// ==========================================
// 仅作为参考数据加载（供外部访问控制层使用）
// 不参与聚合计算，不校验口令
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 角色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// 角色 ID（唯一键）
    pub role_id: String,
    /// 角色名称（如 Administrator / Researcher / Investor）
    pub name: String,
}

/// 用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 用户 ID（唯一键）
    pub user_id: String,
    /// 用户名（表内唯一）
    pub username: String,
    /// 邮箱（可作为登录标识）
    pub email: Option<String>,
    /// 角色引用（加载时必须可解析）
    pub role_id: String,
    /// 创建时间
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// 判断登录标识是否匹配（用户名或邮箱）
    pub fn matches_login(&self, login_id: &str) -> bool {
        if self.username == login_id {
            return true;
        }
        self.email.as_deref() == Some(login_id)
    }
}

// ==========================================
// 导入中间结构
// ==========================================

/// 角色表原始行记录
#[derive(Debug, Clone, Default)]
pub struct RawRoleRecord {
    pub role_id: Option<String>,
    pub name: Option<String>,
    /// 源文件行号（用于校验报告）
    pub row_number: usize,
}

/// 用户表原始行记录
#[derive(Debug, Clone, Default)]
pub struct RawUserRecord {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// 源文件行号（用于校验报告）
    pub row_number: usize,
}

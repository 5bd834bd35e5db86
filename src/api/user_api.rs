// ==========================================
// 非洲关键矿产数据看板 - 用户 API
// ==========================================
// 职责: 用户/角色参考数据的只读查询
// 红线: 不做口令校验（访问控制层为外部协作方）
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Role, User};
use crate::repository::SnapshotStore;

// ==========================================
// UserApi - 用户 API
// ==========================================
pub struct UserApi {
    store: Arc<SnapshotStore>,
}

impl UserApi {
    /// 创建新的UserApi实例
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    /// 角色列表（按角色 ID 有序）
    pub fn list_roles(&self) -> ApiResult<Vec<Role>> {
        let snapshot = self.store.current()?;
        Ok(snapshot.roles.values().cloned().collect())
    }

    /// 用户列表（按用户 ID 有序）
    pub fn list_users(&self) -> ApiResult<Vec<User>> {
        let snapshot = self.store.current()?;
        Ok(snapshot.users.values().cloned().collect())
    }

    /// 按登录标识查用户（用户名或邮箱）
    ///
    /// # 返回
    /// - Ok(User): 唯一匹配的用户
    /// - Err(ApiError::NotFound): 无匹配
    pub fn find_user(&self, login_id: &str) -> ApiResult<User> {
        let login_id = login_id.trim();
        if login_id.is_empty() {
            return Err(ApiError::InvalidInput("登录标识不能为空".to_string()));
        }

        let snapshot = self.store.current()?;
        snapshot
            .users
            .values()
            .find(|user| user.matches_login(login_id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("用户(login={})不存在", login_id)))
    }

    /// 用户按角色名分组（角色名有序；组内按用户 ID 有序）
    pub fn users_by_role(&self) -> ApiResult<BTreeMap<String, Vec<User>>> {
        let snapshot = self.store.current()?;

        let mut grouped: BTreeMap<String, Vec<User>> = BTreeMap::new();
        for user in snapshot.users.values() {
            // 角色引用在加载期已校验可解析
            let role_name = snapshot
                .roles
                .get(&user.role_id)
                .map(|role| role.name.clone())
                .unwrap_or_else(|| user.role_id.clone());
            grouped.entry(role_name).or_default().push(user.clone());
        }
        Ok(grouped)
    }
}

// ==========================================
// 非洲关键矿产数据看板 - 应用层
// ==========================================
// 职责: 应用状态装配与默认路径解析
// ==========================================

pub mod state;

pub use state::{get_default_config_path, get_default_data_dir, AppState};

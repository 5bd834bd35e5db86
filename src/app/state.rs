// ==========================================
// 非洲关键矿产数据看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{DashboardApi, QueryApi, UserApi};
use crate::config::{ConfigManager, LoaderConfigReader};
use crate::importer::{LoadReport, SnapshotImporter, SnapshotLoader};
use crate::repository::SnapshotStore;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据目录
    pub data_dir: PathBuf,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 快照仓储
    pub store: Arc<SnapshotStore>,

    /// 查询API
    pub query_api: Arc<QueryApi>,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,

    /// 用户API
    pub user_api: Arc<UserApi>,

    /// 初始加载报告（含非致命校验违规）
    pub initial_report: LoadReport,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - data_dir: 数据目录
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 加载配置
    /// 2. 执行初始快照加载（失败则启动失败——无可服务数据）
    /// 3. 创建所有API实例
    pub async fn new(data_dir: PathBuf) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据目录: {}", data_dir.display());

        // ==========================================
        // 初始化配置层
        // ==========================================
        let config_path = get_default_config_path();
        let config_manager = Arc::new(
            ConfigManager::new(&config_path)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // 应用界面语言配置
        if let Ok(locale) = config_manager.get_locale() {
            crate::i18n::set_locale(&locale);
        }

        let delimiter = config_manager
            .get_csv_delimiter()
            .await
            .map_err(|e| format!("无法读取CSV分隔符配置: {}", e))?;
        let strict_coordinates = config_manager
            .get_strict_coordinates()
            .await
            .map_err(|e| format!("无法读取坐标校验配置: {}", e))?;
        let top_list_limit = config_manager
            .get_top_list_limit()
            .await
            .map_err(|e| format!("无法读取领先榜条数配置: {}", e))?;

        // ==========================================
        // 初始快照加载
        // ==========================================
        let loader: Arc<dyn SnapshotImporter> =
            Arc::new(SnapshotLoader::new(delimiter, strict_coordinates));

        let outcome = loader
            .load_from_dir(&data_dir)
            .await
            .map_err(|e| format!("初始快照加载失败: {}", e))?;
        let initial_report = outcome.report;

        let store = Arc::new(SnapshotStore::new(outcome.snapshot));

        // ==========================================
        // 初始化API层
        // ==========================================
        let query_api = Arc::new(QueryApi::new(store.clone(), loader));
        let dashboard_api = Arc::new(DashboardApi::new(store.clone(), top_list_limit));
        let user_api = Arc::new(UserApi::new(store.clone()));

        tracing::info!(
            snapshot_id = %initial_report.snapshot_id,
            warnings = initial_report.warnings.len(),
            "AppState初始化完成"
        );

        Ok(Self {
            data_dir,
            config_manager,
            store,
            query_api,
            dashboard_api,
            user_api,
            initial_report,
        })
    }

    /// 获取数据目录
    pub fn get_data_dir(&self) -> &PathBuf {
        &self.data_dir
    }
}

// ==========================================
// 默认路径辅助函数
// ==========================================

/// 获取默认数据目录
///
/// # 返回
/// - 环境变量 MINERALS_DASHBOARD_DATA_DIR 指定的目录（便于调试/测试/CI）
/// - 否则: 用户数据目录/minerals-dashboard[-dev]/data
/// - 兜底: ./data
pub fn get_default_data_dir() -> PathBuf {
    // 允许通过环境变量显式指定数据目录
    if let Ok(path) = std::env::var("MINERALS_DASHBOARD_DATA_DIR") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖。
    let mut path = PathBuf::from("./data");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("minerals-dashboard-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("minerals-dashboard");
        }

        path = path.join("data");
    }

    path
}

/// 获取默认配置文件路径
///
/// # 返回
/// - 用户配置目录/minerals-dashboard/config.json
/// - 兜底: ./config.json
pub fn get_default_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("minerals-dashboard").join("config.json")
    } else {
        PathBuf::from("./config.json")
    }
}

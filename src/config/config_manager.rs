// ==========================================
// 非洲关键矿产数据看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON 文件 (key-value)
// ==========================================

use crate::config::loader_config_trait::LoaderConfigReader;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config_path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - config_path: 配置文件路径（不存在时按空配置处理，首次覆写时创建）
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self, Box<dyn Error>> {
        let config_path = config_path.as_ref().to_path_buf();
        let values = if config_path.exists() {
            let raw = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            config_path,
            values: Mutex::new(values),
        })
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let values = self
            .values
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        Ok(values.get(key).cloned())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 覆写配置值并持久化
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let snapshot = {
            let mut values = self
                .values
                .lock()
                .map_err(|e| format!("锁获取失败: {}", e))?;
            values.insert(key.to_string(), value.to_string());
            values.clone()
        };

        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(
            &self.config_path,
            serde_json::to_string_pretty(&json!(snapshot))?,
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON 格式）
    ///
    /// # 用途
    /// - 记录加载报告旁的配置口径
    /// - 问题排查时还原当时配置
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let values = self
            .values
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?
            .clone();
        Ok(serde_json::to_string(&json!(values))?)
    }

    // ===== 界面相关配置 =====

    /// 界面语言（"zh-CN" / "en"）
    pub fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::LOCALE, "zh-CN")
    }
}

// ==========================================
// LoaderConfigReader Trait 实现
// ==========================================
#[async_trait]
impl LoaderConfigReader for ConfigManager {
    async fn get_csv_delimiter(&self) -> Result<u8, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::CSV_DELIMITER, ",")?;
        let bytes = value.as_bytes();
        if bytes.len() == 1 {
            Ok(bytes[0])
        } else {
            Ok(b',') // 配置非法时回退默认分隔符
        }
    }

    async fn get_strict_coordinates(&self) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::STRICT_COORDINATES, "false")?;
        Ok(value.trim().eq_ignore_ascii_case("true"))
    }

    async fn get_top_list_limit(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::TOP_LIST_LIMIT, "6")?;
        Ok(value.parse::<usize>().unwrap_or(6))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 加载
    pub const CSV_DELIMITER: &str = "csv_delimiter";
    pub const STRICT_COORDINATES: &str = "strict_coordinates";

    // 看板
    pub const TOP_LIST_LIMIT: &str = "top_list_limit";

    // 界面
    pub const LOCALE: &str = "locale";
}

// ==========================================
// 非洲关键矿产数据看板 - 加载配置读取 Trait
// ==========================================
// 职责: 定义加载器需要的配置读取接口（不包含实现）
// 实现者: ConfigManager
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// LoaderConfigReader Trait
// ==========================================
#[async_trait]
pub trait LoaderConfigReader: Send + Sync {
    /// CSV 分隔符（单字节；配置非法时回退 ','）
    async fn get_csv_delimiter(&self) -> Result<u8, Box<dyn Error>>;

    /// 坐标越界是否按 ERROR 处理（默认 false——源数据坐标为近似值）
    async fn get_strict_coordinates(&self) -> Result<bool, Box<dyn Error>>;

    /// 领先榜默认条数
    async fn get_top_list_limit(&self) -> Result<usize, Box<dyn Error>>;
}

// ==========================================
// 非洲关键矿产数据看板 - 导入 Trait
// ==========================================
// 职责: 定义快照导入接口（不包含实现）
// ==========================================

use crate::importer::error::{LoadResult, ParseError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// SnapshotImporter Trait
// ==========================================
// 用途: 快照加载主接口
// 实现者: SnapshotLoader
#[async_trait]
pub trait SnapshotImporter: Send + Sync {
    /// 从数据目录加载完整快照
    ///
    /// # 参数
    /// - dir: 数据目录（包含 countries/minerals/sites/production_stats
    ///   及可选的 users/roles 表文件）
    ///
    /// # 返回
    /// - Ok(LoadOutcome): 完整校验通过的快照 + 加载报告
    /// - Err(LoadError): 解析或校验失败；不产出部分快照
    ///
    /// # 加载流程（4 个阶段）
    /// 1. 文件解析（各表并发）
    /// 2. 字段映射与类型转换
    /// 3. 校验（唯一性 / 引用完整性 / 取值范围）
    /// 4. 快照组装（元信息 + 有序集合）
    async fn load_from_dir(&self, dir: &Path) -> LoadResult<crate::importer::LoadOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<HashMap<String, String>>): 行记录列表（空白行已剔除）
    /// - Err(ParseError): 文件读取错误、格式错误
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> Result<Vec<HashMap<String, String>>, ParseError>;
}

// ==========================================
// 非洲关键矿产数据看板 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: ParseError（格式/类型） / ValidationError（引用/唯一性） / LoadError（汇总）
// ==========================================

use crate::importer::validator::ValidationViolation;
use thiserror::Error;

// ==========================================
// ParseError - 解析错误
// ==========================================

/// 解析错误（文件格式、行结构、类型转换）
#[derive(Error, Debug)]
pub enum ParseError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败 (文件 {file}): {message}")]
    CsvParseError { file: String, message: String },

    #[error("Excel 解析失败 (文件 {file}): {message}")]
    ExcelParseError { file: String, message: String },

    // ===== 表结构错误 =====
    #[error("缺少必需列 (文件 {file}): {column}")]
    MissingColumn { file: String, column: String },

    // ===== 类型转换错误 =====
    #[error("类型转换失败 (文件 {file}, 行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        file: String,
        row: usize,
        field: String,
        message: String,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::FileReadError(err.to_string())
    }
}

// ==========================================
// ValidationError - 校验错误
// ==========================================

/// 校验错误（引用完整性、唯一性、取值范围）
///
/// 携带完整违规列表；仅当存在至少一条 ERROR 级违规时构造。
#[derive(Error, Debug)]
#[error("数据校验失败: {error_count} 条 ERROR 级违规, 首条: {first}")]
pub struct ValidationError {
    /// ERROR 级违规数
    pub error_count: usize,
    /// 首条 ERROR 级违规描述
    pub first: String,
    /// 全部违规（含 WARNING / INFO）
    pub violations: Vec<ValidationViolation>,
}

// ==========================================
// LoadError - 加载错误汇总
// ==========================================

/// 快照加载错误
///
/// 一次加载要么产出完整快照，要么以该类型失败；
/// 失败不影响已发布的旧快照。
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("数据目录不存在: {0}")]
    DataDirNotFound(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type LoadResult<T> = Result<T, LoadError>;

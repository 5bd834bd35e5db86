// ==========================================
// 非洲关键矿产数据看板 - 快照加载器实现
// ==========================================
// 职责: 整合加载流程，从数据目录到完整快照
// 流程: 解析（并发） → 映射 → 校验 → 组装
// 原子性: 校验全部通过前不产出任何快照
// ==========================================

use crate::domain::types::SiteStatus;
use crate::domain::{
    Country, Mineral, ProductionStat, RawCountryRecord, RawMineralRecord, RawProductionRecord,
    RawRoleRecord, RawSiteRecord, RawUserRecord, Role, Site, Snapshot, SnapshotMeta, StatKey,
    TableCounts, User, DEFAULT_UNIT,
};
use crate::importer::error::{LoadError, LoadResult, ParseError, ValidationError};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::loader_trait::SnapshotImporter;
use crate::importer::table_mapper::TableMapper;
use crate::importer::validator::{ReferenceValidator, ValidationViolation};
use crate::{
    TABLE_COUNTRIES, TABLE_MINERALS, TABLE_PRODUCTION, TABLE_ROLES, TABLE_SITES, TABLE_USERS,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

// 表头占第 1 行，首条数据行号为 2
const FIRST_DATA_ROW: usize = 2;

// ==========================================
// 加载结果
// ==========================================

/// 加载报告（随成功加载返回）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// 本次加载生成的快照 ID
    pub snapshot_id: String,
    /// 加载完成时间
    pub loaded_at: DateTime<Utc>,
    /// 源数据目录
    pub source_dir: String,
    /// 各表行数
    pub counts: TableCounts,
    /// 非致命违规（WARNING / INFO）
    pub warnings: Vec<ValidationViolation>,
    /// 加载耗时（毫秒）
    pub elapsed_ms: u64,
}

/// 加载产出：快照 + 报告
#[derive(Debug)]
pub struct LoadOutcome {
    pub snapshot: Snapshot,
    pub report: LoadReport,
}

// ==========================================
// 解析中间结构
// ==========================================

type RawRow = HashMap<String, String>;

struct ParsedTable {
    /// 实际解析的文件名（用于错误与报告）
    file: String,
    rows: Vec<RawRow>,
}

struct ParsedTables {
    countries: ParsedTable,
    minerals: ParsedTable,
    sites: ParsedTable,
    production: ParsedTable,
    users: ParsedTable,
    roles: ParsedTable,
}

// ==========================================
// SnapshotLoader - 快照加载器
// ==========================================
pub struct SnapshotLoader {
    delimiter: u8,
    mapper: TableMapper,
    validator: ReferenceValidator,
}

impl SnapshotLoader {
    /// 创建新的 SnapshotLoader 实例
    ///
    /// # 参数
    /// - delimiter: CSV 分隔符
    /// - strict_coordinates: 坐标越界是否按 ERROR 处理
    pub fn new(delimiter: u8, strict_coordinates: bool) -> Self {
        Self {
            delimiter,
            mapper: TableMapper::new(),
            validator: ReferenceValidator::new(strict_coordinates),
        }
    }

    // ==========================================
    // 阶段 1: 文件解析（各表并发）
    // ==========================================

    /// 在数据目录下定位表文件（CSV 优先，其次 Excel）
    fn resolve_table_file(dir: &Path, table: &str) -> Option<PathBuf> {
        for ext in ["csv", "xlsx", "xls"] {
            let candidate = dir.join(format!("{}.{}", table, ext));
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }

    async fn parse_tables(&self, dir: &Path) -> LoadResult<ParsedTables> {
        // (表名, 是否必需)；users/roles 可缺省（参考数据）
        let specs = [
            (TABLE_COUNTRIES, true),
            (TABLE_MINERALS, true),
            (TABLE_SITES, true),
            (TABLE_PRODUCTION, true),
            (TABLE_USERS, false),
            (TABLE_ROLES, false),
        ];

        let mut handles = Vec::with_capacity(specs.len());
        for (table, required) in specs {
            match Self::resolve_table_file(dir, table) {
                Some(path) => {
                    let file = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| format!("{}.csv", table));
                    let delimiter = self.delimiter;
                    let handle = tokio::task::spawn_blocking(move || {
                        UniversalFileParser::new(delimiter).parse(&path)
                    });
                    handles.push((file, Some(handle)));
                }
                None if required => {
                    return Err(ParseError::FileNotFound(
                        dir.join(format!("{}.csv", table)).display().to_string(),
                    )
                    .into());
                }
                None => {
                    debug!(table = table, "可选表文件缺省，按空表处理");
                    handles.push((format!("{}.csv", table), None));
                }
            }
        }

        let joined = futures::future::join_all(handles.into_iter().map(|(file, handle)| async move {
            let rows = match handle {
                Some(h) => h
                    .await
                    .map_err(|e| LoadError::Internal(format!("解析任务失败: {}", e)))??,
                None => Vec::new(),
            };
            Ok::<ParsedTable, LoadError>(ParsedTable { file, rows })
        }))
        .await;

        let mut tables = Vec::with_capacity(joined.len());
        for table in joined {
            tables.push(table?);
        }

        let mut it = tables.into_iter();
        let mut next = |table: &str| {
            it.next().unwrap_or_else(|| ParsedTable {
                file: format!("{}.csv", table),
                rows: Vec::new(),
            })
        };

        Ok(ParsedTables {
            countries: next(TABLE_COUNTRIES),
            minerals: next(TABLE_MINERALS),
            sites: next(TABLE_SITES),
            production: next(TABLE_PRODUCTION),
            users: next(TABLE_USERS),
            roles: next(TABLE_ROLES),
        })
    }

    // ==========================================
    // 阶段 2: 字段映射
    // ==========================================

    fn map_rows<T>(
        table: &ParsedTable,
        mut map_one: impl FnMut(&str, &RawRow, usize) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut records = Vec::with_capacity(table.rows.len());
        for (idx, row) in table.rows.iter().enumerate() {
            records.push(map_one(&table.file, row, idx + FIRST_DATA_ROW)?);
        }
        Ok(records)
    }

    // ==========================================
    // 阶段 4: 快照组装（校验通过后）
    // ==========================================

    fn assemble_countries(
        file: &str,
        records: Vec<RawCountryRecord>,
    ) -> LoadResult<BTreeMap<String, Country>> {
        let mut map = BTreeMap::new();
        for record in records {
            let row = record.row_number;
            let iso_code = required(record.iso_code, file, row, "CountryID")?;
            let country = Country {
                name: required(record.name, file, row, "CountryName")?,
                region: record.region,
                gdp_billion_usd: record.gdp_billion_usd,
                mining_revenue_billion_usd: record.mining_revenue_billion_usd,
                key_projects: record.key_projects,
                iso_code: iso_code.clone(),
            };
            map.insert(iso_code, country);
        }
        Ok(map)
    }

    fn assemble_minerals(
        file: &str,
        records: Vec<RawMineralRecord>,
    ) -> LoadResult<BTreeMap<String, Mineral>> {
        let mut map = BTreeMap::new();
        for record in records {
            let row = record.row_number;
            let code = required(record.code, file, row, "MineralID")?;
            let mineral = Mineral {
                name: required(record.name, file, row, "MineralName")?,
                unit: record.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string()),
                description: record.description,
                code: code.clone(),
            };
            map.insert(code, mineral);
        }
        Ok(map)
    }

    fn assemble_sites(
        file: &str,
        records: Vec<RawSiteRecord>,
    ) -> LoadResult<BTreeMap<String, Site>> {
        let mut map = BTreeMap::new();
        for record in records {
            let row = record.row_number;
            let site_id = required(record.site_id, file, row, "SiteID")?;
            let status_raw = required(record.status, file, row, "Status")?;
            let status = SiteStatus::from_str(&status_raw).ok_or_else(|| {
                LoadError::Internal(format!(
                    "校验后状态仍不可解析 (文件 {}, 行 {}): {}",
                    file, row, status_raw
                ))
            })?;
            let site = Site {
                name: record.name,
                country_iso: required(record.country_iso, file, row, "CountryID")?,
                mineral_code: required(record.mineral_code, file, row, "MineralID")?,
                latitude: required(record.latitude, file, row, "Latitude")?,
                longitude: required(record.longitude, file, row, "Longitude")?,
                status,
                output_tonnes: record.output_tonnes,
                site_id: site_id.clone(),
            };
            map.insert(site_id, site);
        }
        Ok(map)
    }

    fn assemble_production(
        file: &str,
        records: Vec<RawProductionRecord>,
    ) -> LoadResult<BTreeMap<StatKey, ProductionStat>> {
        let mut map = BTreeMap::new();
        for record in records {
            let row = record.row_number;
            let stat = ProductionStat {
                country_iso: required(record.country_iso, file, row, "CountryID")?,
                mineral_code: required(record.mineral_code, file, row, "MineralID")?,
                year: required(record.year, file, row, "Year")?,
                quantity: required(record.quantity, file, row, "Production_tonnes")?,
                export_value_billion_usd: record.export_value_billion_usd,
                source: record.source,
            };
            map.insert(stat.key(), stat);
        }
        Ok(map)
    }

    fn assemble_roles(
        file: &str,
        records: Vec<RawRoleRecord>,
    ) -> LoadResult<BTreeMap<String, Role>> {
        let mut map = BTreeMap::new();
        for record in records {
            let row = record.row_number;
            let role_id = required(record.role_id, file, row, "RoleID")?;
            let role = Role {
                name: required(record.name, file, row, "RoleName")?,
                role_id: role_id.clone(),
            };
            map.insert(role_id, role);
        }
        Ok(map)
    }

    fn assemble_users(
        file: &str,
        records: Vec<RawUserRecord>,
    ) -> LoadResult<BTreeMap<String, User>> {
        let mut map = BTreeMap::new();
        for record in records {
            let row = record.row_number;
            let user_id = required(record.user_id, file, row, "UserID")?;
            let user = User {
                username: required(record.username, file, row, "Username")?,
                email: record.email,
                role_id: required(record.role_id, file, row, "RoleID")?,
                created_at: record.created_at,
                user_id: user_id.clone(),
            };
            map.insert(user_id, user);
        }
        Ok(map)
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new(b',', false)
    }
}

#[async_trait::async_trait]
impl SnapshotImporter for SnapshotLoader {
    /// 从数据目录加载完整快照
    ///
    /// # 返回
    /// - Ok(LoadOutcome): 完整校验通过的快照 + 报告
    /// - Err(LoadError): 解析或校验失败；调用方保留旧快照
    async fn load_from_dir(&self, dir: &Path) -> LoadResult<LoadOutcome> {
        let start_time = Instant::now();
        let snapshot_id = Uuid::new_v4().to_string();

        if !dir.is_dir() {
            return Err(LoadError::DataDirNotFound(dir.display().to_string()));
        }

        info!(snapshot_id = %snapshot_id, dir = %dir.display(), "开始加载数据目录");

        // === 阶段 1: 文件解析（各表并发） ===
        debug!("阶段 1: 文件解析");
        let parsed = self.parse_tables(dir).await?;
        info!(
            countries = parsed.countries.rows.len(),
            minerals = parsed.minerals.rows.len(),
            sites = parsed.sites.rows.len(),
            production_stats = parsed.production.rows.len(),
            users = parsed.users.rows.len(),
            roles = parsed.roles.rows.len(),
            "文件解析完成"
        );

        // 必需列检查
        self.mapper.check_required_columns(
            &parsed.countries.file,
            &parsed.countries.rows,
            &["CountryID", "CountryName"],
        )?;
        self.mapper.check_required_columns(
            &parsed.minerals.file,
            &parsed.minerals.rows,
            &["MineralID", "MineralName"],
        )?;
        self.mapper.check_required_columns(
            &parsed.sites.file,
            &parsed.sites.rows,
            &["SiteID", "CountryID", "MineralID", "Latitude", "Longitude", "Status"],
        )?;
        self.mapper.check_required_columns(
            &parsed.production.file,
            &parsed.production.rows,
            &["CountryID", "MineralID", "Year", "Production_tonnes"],
        )?;
        self.mapper.check_required_columns(
            &parsed.users.file,
            &parsed.users.rows,
            &["UserID", "Username", "RoleID"],
        )?;
        self.mapper.check_required_columns(
            &parsed.roles.file,
            &parsed.roles.rows,
            &["RoleID", "RoleName"],
        )?;

        // === 阶段 2: 字段映射 ===
        debug!("阶段 2: 字段映射");
        let raw_countries = Self::map_rows(&parsed.countries, |f, row, n| {
            self.mapper.map_country(f, row, n)
        })?;
        let raw_minerals = Self::map_rows(&parsed.minerals, |f, row, n| {
            self.mapper.map_mineral(f, row, n)
        })?;
        let raw_sites =
            Self::map_rows(&parsed.sites, |f, row, n| self.mapper.map_site(f, row, n))?;
        let raw_production = Self::map_rows(&parsed.production, |f, row, n| {
            self.mapper.map_production(f, row, n)
        })?;
        let raw_users =
            Self::map_rows(&parsed.users, |f, row, n| self.mapper.map_user(f, row, n))?;
        let raw_roles =
            Self::map_rows(&parsed.roles, |f, row, n| self.mapper.map_role(f, row, n))?;

        // === 阶段 3: 校验 ===
        debug!("阶段 3: 校验");
        let country_keys: BTreeSet<String> = raw_countries
            .iter()
            .filter_map(|r| r.iso_code.clone())
            .collect();
        let mineral_keys: BTreeSet<String> =
            raw_minerals.iter().filter_map(|r| r.code.clone()).collect();
        let role_keys: BTreeSet<String> =
            raw_roles.iter().filter_map(|r| r.role_id.clone()).collect();

        let mut violations = Vec::new();
        violations.extend(
            self.validator
                .validate_countries(&parsed.countries.file, &raw_countries),
        );
        violations.extend(
            self.validator
                .validate_minerals(&parsed.minerals.file, &raw_minerals),
        );
        violations.extend(self.validator.validate_sites(
            &parsed.sites.file,
            &raw_sites,
            &country_keys,
            &mineral_keys,
        ));
        violations.extend(self.validator.validate_production(
            &parsed.production.file,
            &raw_production,
            &country_keys,
            &mineral_keys,
        ));
        violations.extend(
            self.validator
                .validate_roles(&parsed.roles.file, &raw_roles),
        );
        violations.extend(
            self.validator
                .validate_users(&parsed.users.file, &raw_users, &role_keys),
        );

        let report = self.validator.generate_report(violations);
        for violation in &report.violations {
            match violation.level {
                crate::domain::ValidationLevel::Error => {
                    warn!(detail = %violation.describe(), "ERROR 级校验违规")
                }
                _ => debug!(detail = %violation.describe(), "非致命校验违规"),
            }
        }

        if report.has_errors() {
            let first = report
                .violations
                .iter()
                .find(|v| v.level == crate::domain::ValidationLevel::Error)
                .map(|v| v.describe())
                .unwrap_or_else(|| "未知违规".to_string());
            warn!(
                snapshot_id = %snapshot_id,
                errors = report.summary.errors,
                "校验失败，放弃本次加载"
            );
            return Err(ValidationError {
                error_count: report.summary.errors,
                first,
                violations: report.violations,
            }
            .into());
        }

        // === 阶段 4: 快照组装 ===
        debug!("阶段 4: 快照组装");
        let countries = Self::assemble_countries(&parsed.countries.file, raw_countries)?;
        let minerals = Self::assemble_minerals(&parsed.minerals.file, raw_minerals)?;
        let sites = Self::assemble_sites(&parsed.sites.file, raw_sites)?;
        let production = Self::assemble_production(&parsed.production.file, raw_production)?;
        let roles = Self::assemble_roles(&parsed.roles.file, raw_roles)?;
        let users = Self::assemble_users(&parsed.users.file, raw_users)?;

        let loaded_at = Utc::now();
        let counts = TableCounts {
            countries: countries.len(),
            minerals: minerals.len(),
            sites: sites.len(),
            production_stats: production.len(),
            users: users.len(),
            roles: roles.len(),
        };

        let snapshot = Snapshot {
            meta: SnapshotMeta {
                snapshot_id: snapshot_id.clone(),
                loaded_at,
                source_dir: dir.display().to_string(),
                counts,
            },
            countries,
            minerals,
            sites,
            production,
            users,
            roles,
        };

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            snapshot_id = %snapshot_id,
            elapsed_ms = elapsed_ms,
            warnings = report.summary.warnings,
            "快照加载完成"
        );

        Ok(LoadOutcome {
            snapshot,
            report: LoadReport {
                snapshot_id,
                loaded_at,
                source_dir: dir.display().to_string(),
                counts,
                warnings: report.non_fatal(),
                elapsed_ms,
            },
        })
    }
}

// ==========================================
// 组装辅助
// ==========================================

// 组装仅在零 ERROR 违规后执行；字段缺失说明校验遗漏，按内部错误上抛
fn required<T>(value: Option<T>, file: &str, row: usize, field: &str) -> LoadResult<T> {
    value.ok_or_else(|| {
        LoadError::Internal(format!(
            "校验后字段仍缺失 (文件 {}, 行 {}, 字段 {})",
            file, row, field
        ))
    })
}

// ==========================================
// 非洲关键矿产数据看板 - 控制台主入口
// ==========================================
// 用法: minerals-dashboard [数据目录]
// 加载数据目录并打印看板总览（展示层为外部协作方）
// ==========================================

use std::path::PathBuf;

use minerals_dashboard::app::{get_default_data_dir, AppState};
use minerals_dashboard::i18n::t;

#[tokio::main]
async fn main() {
    // 初始化日志系统
    minerals_dashboard::logging::init();

    tracing::info!("==================================================");
    tracing::info!("非洲关键矿产数据看板 - 决策支持服务");
    tracing::info!("系统版本: {}", minerals_dashboard::VERSION);
    tracing::info!("==================================================");

    // 获取数据目录（命令行参数优先）
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(get_default_data_dir);
    tracing::info!("使用数据目录: {}", data_dir.display());

    // 创建AppState（含初始快照加载）
    tracing::info!("正在初始化AppState...");
    let app_state = AppState::new(data_dir)
        .await
        .expect("无法初始化AppState");

    for warning in &app_state.initial_report.warnings {
        tracing::warn!("加载告警: {}", warning.describe());
    }

    // 打印看板总览
    let overview = app_state
        .dashboard_api
        .get_overview()
        .expect("无法生成看板总览");

    println!("==================================================");
    println!("{}", t("dashboard.title"));
    println!("==================================================");
    println!(
        "{}: {:.1}",
        t("dashboard.total_mining_revenue"),
        overview.total_mining_revenue_billion_usd
    );
    println!(
        "{}: {:.1}",
        t("dashboard.total_gdp"),
        overview.total_gdp_billion_usd
    );
    println!("{}: {}", t("dashboard.sites"), overview.counts.sites);
    println!();

    println!("{}:", t("dashboard.top_minerals"));
    for entry in &overview.top_minerals {
        println!(
            "  {:<4} {:<16} {:>14.1} {}",
            entry.mineral_code, entry.mineral_name, entry.total_quantity, entry.unit
        );
    }
    println!();

    println!("{}:", t("dashboard.top_countries"));
    for entry in &overview.top_countries {
        println!(
            "  {:<4} {:<16} {:>14.1}",
            entry.country_iso, entry.country_name, entry.total_quantity
        );
    }

    tracing::info!("看板总览输出完成");
}

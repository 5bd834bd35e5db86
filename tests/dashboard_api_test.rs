// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试目标: 总览指标 / 领先榜 / 国家画像 / 地图点位
// ==========================================

mod helpers;

use std::sync::Arc;

use helpers::test_data_builder::SnapshotBuilder;
use minerals_dashboard::api::{ApiError, DashboardApi, InvalidFilterError};
use minerals_dashboard::repository::SnapshotStore;

fn create_test_api() -> DashboardApi {
    let snapshot = SnapshotBuilder::new()
        .country_with_economy("CD", "DR Congo", 64.0, 16.0)
        .country_with_economy("ZM", "Zambia", 29.0, 6.0)
        .mineral("CO", "Cobalt")
        .mineral("CU", "Copper")
        .site("S1", "CD", "CO", -10.7, 25.5)
        .site("S2", "ZM", "CU", -12.1, 26.4)
        .stat("CD", "CO", 2022, 150000.0)
        .stat("CD", "CO", 2023, 170000.0)
        .stat("ZM", "CO", 2023, 8000.0)
        .stat("ZM", "CU", 2023, 760000.0)
        .build();
    let store = Arc::new(SnapshotStore::new(snapshot));
    DashboardApi::new(store, 6)
}

#[test]
fn test_get_overview_headline_metrics() {
    let api = create_test_api();

    let overview = api.get_overview().unwrap();
    assert_eq!(overview.total_gdp_billion_usd, 93.0);
    assert_eq!(overview.total_mining_revenue_billion_usd, 22.0);
    assert_eq!(overview.counts.sites, 2);
    assert_eq!(overview.top_minerals.len(), 2);
    assert_eq!(overview.top_countries.len(), 2);
}

#[test]
fn test_top_minerals_descending_with_limit() {
    let api = create_test_api();

    let top = api.top_minerals(1).unwrap();
    assert_eq!(top.len(), 1);
    // CU: 760000 > CO: 328000
    assert_eq!(top[0].mineral_code, "CU");
    assert_eq!(top[0].mineral_name, "Copper");
}

#[test]
fn test_top_countries_descending() {
    let api = create_test_api();

    let top = api.top_countries(6).unwrap();
    // ZM: 768000 > CD: 320000
    assert_eq!(top[0].country_iso, "ZM");
    assert_eq!(top[1].country_iso, "CD");
    assert_eq!(top[1].total_quantity, 320000.0);
}

#[test]
fn test_top_list_limit_bounds() {
    let api = create_test_api();
    assert!(matches!(api.top_minerals(0), Err(ApiError::InvalidInput(_))));
    assert!(matches!(
        api.top_countries(1001),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_get_country_profile() {
    let api = create_test_api();

    let profile = api.get_country_profile("cd").unwrap();
    assert_eq!(profile.country_iso, "CD");
    assert_eq!(profile.mining_share_pct, Some(25.0));
    assert_eq!(profile.site_count, 1);
    assert_eq!(profile.production_by_mineral.len(), 1);
    assert_eq!(profile.production_by_mineral[0].total_quantity, 320000.0);
}

#[test]
fn test_get_country_profile_not_found() {
    let api = create_test_api();
    assert!(matches!(
        api.get_country_profile("XX"),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_compare_countries() {
    let api = create_test_api();

    let entries = api
        .compare_countries(&["ZM".to_string(), "CD".to_string()])
        .unwrap();
    // 按入参顺序
    assert_eq!(entries[0].country_iso, "ZM");
    assert_eq!(entries[0].production_by_mineral.len(), 2);
    assert_eq!(entries[1].country_iso, "CD");
}

#[test]
fn test_compare_countries_unknown_iso_rejected() {
    let api = create_test_api();

    let result = api.compare_countries(&["CD".to_string(), "QQ".to_string()]);
    match result {
        Err(ApiError::InvalidFilter(InvalidFilterError::UnknownCountryCode(code))) => {
            assert_eq!(code, "QQ");
        }
        other => panic!("Expected UnknownCountryCode, got {:?}", other.err()),
    }
}

#[test]
fn test_compare_countries_empty_list_rejected() {
    let api = create_test_api();
    assert!(matches!(
        api.compare_countries(&[]),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_site_map_points_all_and_filtered() {
    let api = create_test_api();

    let all = api.list_site_map_points(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].site_id, "S1");
    assert_eq!(all[0].country_name, "DR Congo");

    let cobalt = api.list_site_map_points(Some("co")).unwrap();
    assert_eq!(cobalt.len(), 1);
    assert_eq!(cobalt[0].mineral_code, "CO");
}

#[test]
fn test_site_map_points_unknown_mineral_rejected() {
    let api = create_test_api();
    assert!(matches!(
        api.list_site_map_points(Some("XX")),
        Err(ApiError::InvalidFilter(
            InvalidFilterError::UnknownMineralCode(_)
        ))
    ));
}

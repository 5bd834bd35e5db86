// ==========================================
// 并发重载测试
// ==========================================
// 测试目标: 重载期间的读者只见完整快照（旧或新，绝无混合）
// ==========================================


use std::sync::Arc;

use minerals_dashboard::api::{QueryApi, QueryFilter};
use minerals_dashboard::importer::{SnapshotImporter, SnapshotLoader};
use minerals_dashboard::repository::SnapshotStore;
use test_helpers::{write_table, write_valid_data_dir, SAMPLE_GRAND_TOTAL};

// 替换数据集的产量总计（与样例集不同，便于区分新旧快照）
const REPLACEMENT_GRAND_TOTAL: f64 = 999_000.0;

fn write_replacement_data_dir(dir: &std::path::Path) {
    write_valid_data_dir(dir);
    write_table(
        dir,
        "production_stats.csv",
        &[
            "CountryID,MineralID,Year,Production_tonnes,ExportValue_BillionUSD,Source",
            "CD,CO,2024,999000,12.0,USGS 2025",
        ],
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_data_dir(dir.path());
    let replacement_dir = tempfile::tempdir().unwrap();
    write_replacement_data_dir(replacement_dir.path());

    let loader: Arc<dyn SnapshotImporter> = Arc::new(SnapshotLoader::default());
    let outcome = loader.load_from_dir(dir.path()).await.unwrap();
    let store = Arc::new(SnapshotStore::new(outcome.snapshot));
    let api = Arc::new(QueryApi::new(store.clone(), loader));

    // 读者线程: 持续做全量聚合，总量只可能取两套完整数据之一
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let api = api.clone();
            std::thread::spawn(move || {
                for _ in 0..300 {
                    let total = api
                        .get_totals(&QueryFilter::new())
                        .expect("读取不应失败")
                        .grand_total;
                    assert!(
                        total == SAMPLE_GRAND_TOTAL || total == REPLACEMENT_GRAND_TOTAL,
                        "观察到不完整快照: {}",
                        total
                    );
                }
            })
        })
        .collect();

    // 写者: 在两套数据目录之间往复重载
    for round in 0..6 {
        let path = if round % 2 == 0 {
            replacement_dir.path()
        } else {
            dir.path()
        };
        api.reload_snapshot(path).await.unwrap();
    }

    for handle in readers {
        handle.join().expect("读者线程不应 panic");
    }

    assert_eq!(store.generation(), 7); // 初始 1 次 + 重载 6 次
}

#[tokio::test]
async fn test_inflight_reader_keeps_old_snapshot_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    write_valid_data_dir(dir.path());
    let replacement_dir = tempfile::tempdir().unwrap();
    write_replacement_data_dir(replacement_dir.path());

    let loader: Arc<dyn SnapshotImporter> = Arc::new(SnapshotLoader::default());
    let outcome = loader.load_from_dir(dir.path()).await.unwrap();
    let store = Arc::new(SnapshotStore::new(outcome.snapshot));
    let api = QueryApi::new(store.clone(), Arc::new(SnapshotLoader::default()));

    // 模拟在途读者: 先取得快照引用
    let inflight = store.current().unwrap();
    let old_id = inflight.meta.snapshot_id.clone();

    api.reload_snapshot(replacement_dir.path()).await.unwrap();

    // 在途读者手中的快照保持不变
    assert_eq!(inflight.meta.snapshot_id, old_id);
    assert_eq!(inflight.production.len(), 5);

    // 新读者看到替换后的快照
    let fresh = store.current().unwrap();
    assert_ne!(fresh.meta.snapshot_id, old_id);
    assert_eq!(fresh.production.len(), 1);
}

// ==========================================
// 非洲关键矿产数据看板 - 快照仓储
// ==========================================
// 职责: 持有唯一活动快照，原子发布替换
// 并发模型: 读者短暂持读锁克隆 Arc；发布短暂持写锁换引用
// 旧快照在最后一个读者释放 Arc 后回收
// ==========================================

use crate::domain::Snapshot;
use crate::repository::error::{StoreError, StoreResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::info;

// ==========================================
// SnapshotStore - 快照仓储
// ==========================================
pub struct SnapshotStore {
    current: RwLock<Option<Arc<Snapshot>>>,
    /// 发布代数（每次 publish 自增，便于观测与测试）
    generation: AtomicU64,
}

impl SnapshotStore {
    /// 创建空仓储（尚未发布快照）
    pub fn empty() -> Self {
        Self {
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// 以初始快照创建仓储
    pub fn new(initial: Snapshot) -> Self {
        let store = Self::empty();
        // 初始发布不可能失败（锁刚创建，不会中毒）
        if let Ok(mut guard) = store.current.write() {
            *guard = Some(Arc::new(initial));
            store.generation.store(1, Ordering::SeqCst);
        }
        store
    }

    /// 获取当前快照（读者克隆 Arc，随后不再持锁）
    ///
    /// # 返回
    /// - Ok(Arc<Snapshot>): 当前活动快照
    /// - Err(StoreError::NoSnapshotPublished): 尚未发布
    pub fn current(&self) -> StoreResult<Arc<Snapshot>> {
        let guard = self
            .current
            .read()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        guard.clone().ok_or(StoreError::NoSnapshotPublished)
    }

    /// 原子发布新快照
    ///
    /// 仅交换引用，短暂持写锁；在途读者继续使用旧快照。
    ///
    /// # 返回
    /// - Ok(u64): 新发布代数
    pub fn publish(&self, snapshot: Snapshot) -> StoreResult<u64> {
        let snapshot_id = snapshot.meta.snapshot_id.clone();
        let arc = Arc::new(snapshot);
        {
            let mut guard = self
                .current
                .write()
                .map_err(|e| StoreError::LockError(e.to_string()))?;
            *guard = Some(arc);
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(snapshot_id = %snapshot_id, generation = generation, "快照已发布");
        Ok(generation)
    }

    /// 当前发布代数（0 表示尚未发布）
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// 是否已发布快照
    pub fn has_snapshot(&self) -> bool {
        self.current
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SnapshotMeta, TableCounts};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn snapshot(id: &str) -> Snapshot {
        Snapshot {
            meta: SnapshotMeta {
                snapshot_id: id.to_string(),
                loaded_at: Utc::now(),
                source_dir: "/tmp".to_string(),
                counts: TableCounts::default(),
            },
            countries: BTreeMap::new(),
            minerals: BTreeMap::new(),
            sites: BTreeMap::new(),
            production: BTreeMap::new(),
            users: BTreeMap::new(),
            roles: BTreeMap::new(),
        }
    }

    #[test]
    fn test_empty_store_has_no_snapshot() {
        let store = SnapshotStore::empty();
        assert!(!store.has_snapshot());
        assert_eq!(store.generation(), 0);
        assert!(matches!(
            store.current(),
            Err(StoreError::NoSnapshotPublished)
        ));
    }

    #[test]
    fn test_publish_and_read() {
        let store = SnapshotStore::empty();
        store.publish(snapshot("s1")).unwrap();
        assert_eq!(store.generation(), 1);
        assert_eq!(store.current().unwrap().meta.snapshot_id, "s1");
    }

    #[test]
    fn test_publish_replaces_but_readers_keep_old_arc() {
        let store = SnapshotStore::new(snapshot("s1"));
        let old = store.current().unwrap();

        store.publish(snapshot("s2")).unwrap();

        // 在途读者仍持有旧快照，新读者看到新快照
        assert_eq!(old.meta.snapshot_id, "s1");
        assert_eq!(store.current().unwrap().meta.snapshot_id, "s2");
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        use std::thread;

        let store = std::sync::Arc::new(SnapshotStore::new(snapshot("s1")));

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = store.current().unwrap();
                        // 快照 ID 只可能是完整发布过的值
                        assert!(snap.meta.snapshot_id == "s1" || snap.meta.snapshot_id == "s2");
                    }
                })
            })
            .collect();

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    store.publish(snapshot("s2")).unwrap();
                }
            })
        };

        for handle in readers {
            handle.join().unwrap();
        }
        writer.join().unwrap();
    }
}

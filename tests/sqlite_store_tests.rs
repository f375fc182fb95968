use rcountdown::core::registry::Registry;
use rcountdown::core::scheduler::Scheduler;
use rcountdown::core::store::{ITEMS_KEY, KvStore};
use rcountdown::db::kv::SqliteStore;
use rcountdown::db::migrate::run_pending_migrations;
use rcountdown::db::pool::DbPool;
use rcountdown::models::target::{Phase, TargetDraft, Transition};

mod common;
use common::{Recorder, T0, rfc, setup_test_db};

fn draft(title: &str, start: i64) -> TargetDraft {
    TargetDraft::new(title, "https://example.com/item", &rfc(start)).lead(10)
}

#[test]
fn test_kv_get_set_overwrite() {
    let mut store = SqliteStore::new(DbPool::in_memory().unwrap()).unwrap();

    assert_eq!(store.get("missing").unwrap(), None);

    store.set("k", "v1").unwrap();
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
}

#[test]
fn test_migrations_run_once() {
    let mut store = SqliteStore::new(DbPool::in_memory().unwrap()).unwrap();
    let conn = &store.pool_mut().conn;

    assert_eq!(run_pending_migrations(conn).unwrap(), 0);

    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 2);
}

#[test]
fn test_audit_writes_log_rows() {
    let mut store = SqliteStore::new(DbPool::in_memory().unwrap()).unwrap();
    store.audit("add", "abc12345", "'Voucher' added");

    let conn = &store.pool_mut().conn;
    let message: String = conn
        .query_row(
            "SELECT message FROM log WHERE operation = 'add'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(message, "'Voucher' added");
}

#[test]
fn test_registry_survives_reopen() {
    let db_path = setup_test_db("registry_reopen");

    let id = {
        let mut registry = Registry::load(SqliteStore::open(&db_path).unwrap());
        let id = registry
            .add(&TargetDraft::new("Reopen", "https://example.com", &rfc(T0)).lead(42))
            .unwrap();
        registry.mark_phase(&id, Transition::PreAlert);
        id
    };

    let registry = Registry::load(SqliteStore::open(&db_path).unwrap());
    let t = registry.get(&id).unwrap();
    assert_eq!(t.prep_lead_seconds, 42);
    assert!(t.warned);
    assert!(!t.opened);
    assert!(registry.store().get(ITEMS_KEY).unwrap().is_some());
}

#[test]
fn test_watch_tick_keeps_changes_made_through_another_handle() {
    let db_path = setup_test_db("shared_handles");

    // the long-lived handle a running `watch` holds
    let mut watcher = Registry::load(SqliteStore::open(&db_path).unwrap());
    let first = watcher.add(&draft("first", T0 + 5000)).unwrap();
    let doomed = watcher.add(&draft("doomed", T0 + 3000)).unwrap();
    let flipped = watcher.add(&draft("flipped", T0 + 60_000)).unwrap();

    // separate commands while it runs
    let mut other = Registry::load(SqliteStore::open(&db_path).unwrap());
    let second = other.add(&draft("second", T0 + 60_000)).unwrap();
    assert!(other.remove(&doomed));
    assert_eq!(other.toggle_auto_open(&flipped), Some(false));

    let recorder = Recorder::new();
    let mut scheduler = Scheduler::new(recorder.channels());
    let report = scheduler.tick(&mut watcher, T0);

    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].id, first);
    assert_eq!(recorder.sounds(), vec![2]);
    assert!(watcher.get(&second).is_some());

    let on_disk = Registry::load(SqliteStore::open(&db_path).unwrap());
    assert_eq!(on_disk.len(), 3);
    assert!(on_disk.get(&doomed).is_none());
    assert!(on_disk.get(&second).is_some());
    assert!(!on_disk.get(&flipped).unwrap().auto_open);
    assert_eq!(on_disk.get(&first).unwrap().phase(), Phase::PreAlerted);
}

#[test]
fn test_mark_phase_on_stale_handle_does_not_resurrect_removed_target() {
    let db_path = setup_test_db("stale_mark_phase");

    let mut stale = Registry::load(SqliteStore::open(&db_path).unwrap());
    let kept = stale.add(&draft("kept", T0)).unwrap();
    let gone = stale.add(&draft("gone", T0)).unwrap();

    let mut other = Registry::load(SqliteStore::open(&db_path).unwrap());
    other.remove(&gone);
    let added = other.add(&draft("added", T0 + 1000)).unwrap();

    assert!(!stale.mark_phase(&gone, Transition::Start));
    assert!(stale.mark_phase(&kept, Transition::Start));

    let on_disk = Registry::load(SqliteStore::open(&db_path).unwrap());
    let ids: Vec<String> = on_disk.list().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![kept.clone(), added]);
    assert_eq!(on_disk.get(&kept).unwrap().phase(), Phase::Started);
}

#[test]
fn test_target_already_marked_elsewhere_does_not_fire_again() {
    let db_path = setup_test_db("marked_elsewhere");

    let mut watcher = Registry::load(SqliteStore::open(&db_path).unwrap());
    let id = watcher.add(&draft("shared", T0)).unwrap();

    let mut other = Registry::load(SqliteStore::open(&db_path).unwrap());
    other.mark_phase(&id, Transition::PreAlert);
    other.mark_phase(&id, Transition::Start);

    let recorder = Recorder::new();
    let mut scheduler = Scheduler::new(recorder.channels());
    assert!(scheduler.tick(&mut watcher, T0).is_empty());
    assert!(recorder.effects().is_empty());
}

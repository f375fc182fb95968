use rcountdown::core::registry::Registry;
use rcountdown::core::store::{ITEMS_KEY, KvStore, MemoryStore, PROFILE_KEY};
use rcountdown::errors::AppError;
use rcountdown::models::profile::Profile;
use rcountdown::models::target::{Phase, TargetDraft, Transition};
use std::collections::HashSet;

mod common;
use common::{T0, rfc};

fn draft(title: &str, start: i64) -> TargetDraft {
    TargetDraft::new(title, "https://example.com/item", &rfc(start))
}

#[test]
fn test_add_initializes_fresh_target() {
    let mut registry = Registry::load(MemoryStore::new());
    let id = registry
        .add(&draft("  Lunch voucher  ", T0).lead(30).auto_open(false))
        .unwrap();

    let t = registry.get(&id).unwrap();
    assert_eq!(t.title, "Lunch voucher");
    assert_eq!(t.url, "https://example.com/item");
    assert_eq!(t.start, T0);
    assert_eq!(t.prep_lead_seconds, 30);
    assert!(!t.auto_open);
    assert_eq!(t.phase(), Phase::Idle);
    assert!(registry.store().raw(ITEMS_KEY).is_some());
}

#[test]
fn test_add_rejects_invalid_drafts() {
    let mut registry = Registry::load(MemoryStore::new());

    assert_eq!(registry.add(&draft("", T0)), None);
    assert_eq!(registry.add(&draft("   ", T0)), None);
    assert_eq!(
        registry.add(&TargetDraft::new("Title", "  ", &rfc(T0))),
        None
    );
    assert_eq!(
        registry.add(&TargetDraft::new("Title", "https://x", "")),
        None
    );
    assert_eq!(
        registry.add(&TargetDraft::new("Title", "https://x", "tomorrow at noon")),
        None
    );

    assert!(registry.is_empty());
    assert!(registry.store().raw(ITEMS_KEY).is_none());
}

#[test]
fn test_ids_are_unique() {
    let mut registry = Registry::load(MemoryStore::new());
    let ids: HashSet<String> = (0..50)
        .map(|i| registry.add(&draft(&format!("t{i}"), T0 + i)).unwrap())
        .collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_remove_is_idempotent() {
    let mut registry = Registry::load(MemoryStore::new());
    let id = registry.add(&draft("gone", T0)).unwrap();

    assert!(registry.remove(&id));
    assert!(!registry.remove(&id));
    assert!(!registry.remove("does-not-exist"));
    assert!(registry.is_empty());
}

#[test]
fn test_toggle_auto_open() {
    let mut registry = Registry::load(MemoryStore::new());
    let id = registry.add(&draft("toggle", T0)).unwrap();

    assert_eq!(registry.toggle_auto_open(&id), Some(false));
    assert_eq!(registry.toggle_auto_open(&id), Some(true));
    assert_eq!(registry.toggle_auto_open("missing"), None);
}

#[test]
fn test_mark_phase_is_idempotent_and_monotonic() {
    let mut registry = Registry::load(MemoryStore::new());
    let id = registry.add(&draft("flags", T0)).unwrap();

    assert!(registry.mark_phase(&id, Transition::PreAlert));
    assert!(!registry.mark_phase(&id, Transition::PreAlert));
    assert_eq!(registry.get(&id).unwrap().phase(), Phase::PreAlerted);

    assert!(registry.mark_phase(&id, Transition::Start));
    assert!(!registry.mark_phase(&id, Transition::Start));
    registry.toggle_auto_open(&id);

    let t = registry.get(&id).unwrap();
    assert!(t.warned && t.opened);
    assert!(!registry.mark_phase("missing", Transition::Start));
}

#[test]
fn test_list_orders_by_start_then_insertion() {
    let mut registry = Registry::load(MemoryStore::new());
    registry.add(&draft("c", T0 + 3000)).unwrap();
    registry.add(&draft("a1", T0)).unwrap();
    registry.add(&draft("b", T0 + 1000)).unwrap();
    registry.add(&draft("a2", T0)).unwrap();

    let titles: Vec<String> = registry.list().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["a1", "a2", "b", "c"]);
}

#[test]
fn test_persistence_round_trip_keeps_all_fields() {
    let mut registry = Registry::load(MemoryStore::new());
    let a = registry.add(&draft("a", T0 + 5000).lead(15)).unwrap();
    let b = registry.add(&draft("b", T0)).unwrap();
    registry.mark_phase(&a, Transition::PreAlert);
    registry.mark_phase(&b, Transition::PreAlert);
    registry.mark_phase(&b, Transition::Start);
    registry.toggle_auto_open(&b);
    registry.set_profile(Profile {
        name: "Ada".into(),
        phone: "555-0100".into(),
        note: "window seat".into(),
    });

    let reloaded = Registry::load(registry.store().clone());

    assert_eq!(reloaded.list(), registry.list());
    assert_eq!(reloaded.profile(), registry.profile());
}

#[test]
fn test_stored_layout_uses_record_field_names() {
    let mut registry = Registry::load(MemoryStore::new());
    registry.add(&draft("layout", T0)).unwrap();

    let raw = registry.store().raw(ITEMS_KEY).unwrap();
    for field in ["\"id\"", "\"prepSec\"", "\"autoOpen\"", "\"warned\"", "\"opened\"", "\"start\""] {
        assert!(raw.contains(field), "missing {field} in {raw}");
    }
}

#[test]
fn test_loads_records_written_by_earlier_versions() {
    let legacy = r#"[{"id":"k3j9x","title":"Voucher","url":"taobao://item","start":1767225600000,
        "prepSec":20,"autoOpen":false,"opened":false,"warned":true}]"#;
    let store = MemoryStore::new()
        .with_entry(ITEMS_KEY, legacy)
        .with_entry(PROFILE_KEY, r#"{"name":"Lin"}"#);

    let registry = Registry::load(store);

    let t = registry.get("k3j9x").unwrap();
    assert_eq!(t.prep_lead_seconds, 20);
    assert!(!t.auto_open);
    assert_eq!(t.phase(), Phase::PreAlerted);
    assert_eq!(registry.profile().name, "Lin");
    assert_eq!(registry.profile().phone, "");
}

#[test]
fn test_malformed_elements_do_not_drop_the_whole_list() {
    let items = r#"[
        {"id":"good","title":"Good","url":"u","start":1767225600000,"prepSec":15,"autoOpen":true,"warned":false,"opened":false},
        {"id":"half","title":"Half","url":"u","start":1767225601000,"prepSec":1.5,"autoOpen":true,"warned":false,"opened":false},
        {"id":"neg","title":"Neg","url":"u","start":1767225602000,"prepSec":-5,"autoOpen":true,"warned":false,"opened":false},
        {"id":"blank","title":"Blank","url":"u","start":1767225603000,"prepSec":null,"autoOpen":true,"warned":false,"opened":false},
        {"id":"nan","title":"Bad date","url":"u","start":null,"prepSec":10,"autoOpen":true,"warned":false,"opened":false},
        "not a target"
    ]"#;
    let mut registry = Registry::load(MemoryStore::new().with_entry(ITEMS_KEY, items));

    let ids: Vec<String> = registry.list().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["good", "half", "neg", "blank"]);
    assert_eq!(registry.get("good").unwrap().prep_lead_seconds, 15);
    assert_eq!(registry.get("half").unwrap().prep_lead_seconds, 1);
    assert_eq!(registry.get("neg").unwrap().prep_lead_seconds, 0);
    assert_eq!(registry.get("blank").unwrap().prep_lead_seconds, 0);

    // the next write keeps every decodable target
    registry.add(&draft("new", T0)).unwrap();
    let reloaded = Registry::load(registry.store().clone());
    assert_eq!(reloaded.len(), 5);
    assert!(reloaded.get("half").is_some());
}

#[test]
fn test_reload_picks_up_stored_changes() {
    let mut registry = Registry::load(MemoryStore::new());
    assert!(!registry.reload());

    let id = registry.add(&draft("stored", T0)).unwrap();
    let raw = registry.store().raw(ITEMS_KEY).unwrap().replace("\"warned\":false", "\"warned\":true");
    registry.store_mut().set(ITEMS_KEY, &raw).unwrap();

    assert!(registry.reload());
    assert_eq!(registry.get(&id).unwrap().phase(), Phase::PreAlerted);
}

#[test]
fn test_corrupt_records_fall_back_to_empty() {
    let store = MemoryStore::new()
        .with_entry(ITEMS_KEY, "{not json")
        .with_entry(PROFILE_KEY, "[1,2,3]");

    let registry = Registry::load(store);

    assert!(registry.is_empty());
    assert_eq!(registry.profile(), &Profile::default());
}

#[test]
fn test_failing_store_keeps_memory_authoritative() {
    let mut registry = Registry::load(MemoryStore::failing());
    let id = registry.add(&draft("memory only", T0)).unwrap();

    assert!(registry.mark_phase(&id, Transition::Start));
    assert_eq!(registry.len(), 1);
    assert!(registry.store().raw(ITEMS_KEY).is_none());
}

#[test]
fn test_resolve_by_prefix() {
    let items = r#"[
        {"id":"abc111","title":"a","url":"u","start":1,"prepSec":10,"autoOpen":true,"warned":false,"opened":false},
        {"id":"abc222","title":"b","url":"u","start":2,"prepSec":10,"autoOpen":true,"warned":false,"opened":false},
        {"id":"xyz333","title":"c","url":"u","start":3,"prepSec":10,"autoOpen":true,"warned":false,"opened":false}
    ]"#;
    let registry = Registry::load(MemoryStore::new().with_entry(ITEMS_KEY, items));

    assert_eq!(registry.resolve("xyz").unwrap(), "xyz333");
    assert_eq!(registry.resolve("abc222").unwrap(), "abc222");
    assert!(matches!(
        registry.resolve("abc"),
        Err(AppError::AmbiguousTarget(_))
    ));
    assert!(matches!(
        registry.resolve("nope"),
        Err(AppError::UnknownTarget(_))
    ));
    assert!(matches!(
        registry.resolve(""),
        Err(AppError::UnknownTarget(_))
    ));
}

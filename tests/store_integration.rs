//! Store behavior tests against the in-memory backends.
//!
//! These exercise the same row decoding as the PostgreSQL backends without
//! needing a database.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio_test::assert_ok;

use mech_data_service::catalog::{MemoryModuleCatalog, ModuleCatalog, ModuleRow, StatValue};
use mech_data_service::codec::EQUIPPED_MODULES_COLUMN;
use serde_json::{json, Value};
use mech_data_service::metrics::DecodeMetrics;
use mech_data_service::player::{MemoryPlayerStore, ModuleRef, Player, PlayerRow, PlayerStore};
use mech_data_service::DataError;

fn module_ids(refs: &[ModuleRef]) -> BTreeSet<String> {
    refs.iter().filter_map(|r| r.module_id().map(String::from)).collect()
}

fn pilot(xp: i64) -> Player {
    Player {
        player_id: "p1".to_string(),
        username: "ace".to_string(),
        xp,
        level: 3,
        currency: 500,
        equipped_modules: vec!["a".into()],
        owned_modules: vec!["a".into(), "b".into()],
    }
}

fn module_row(id: &str, stats_json: &str) -> ModuleRow {
    ModuleRow {
        module_id: id.to_string(),
        name: format!("Module {}", id),
        module_type: "weapon".to_string(),
        stats_json: Some(stats_json.to_string()),
        description: Some("test module".to_string()),
        cost: 100,
    }
}

// =============================================================================
// Player Store Tests
// =============================================================================

#[tokio::test]
async fn test_save_then_fetch_round_trip() {
    let store = MemoryPlayerStore::new();
    assert_ok!(store.save_player(&pilot(10)).await);

    let fetched = assert_ok!(store.get_player("p1").await).expect("player should exist");
    assert_eq!(module_ids(&fetched.owned_modules), module_ids(&pilot(10).owned_modules));
    assert_eq!(
        module_ids(&fetched.equipped_modules),
        module_ids(&pilot(10).equipped_modules)
    );
    assert_eq!(fetched.username, "ace");
    assert_eq!(fetched.currency, 500);
}

#[tokio::test]
async fn test_saving_identical_data_twice_keeps_one_record() {
    let store = MemoryPlayerStore::new();
    store.save_player(&pilot(10)).await.unwrap();
    store.save_player(&pilot(10)).await.unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get_player("p1").await.unwrap(), Some(pilot(10)));
}

#[tokio::test]
async fn test_conflicting_save_overwrites_fields() {
    let store = MemoryPlayerStore::new();
    store.save_player(&pilot(10)).await.unwrap();

    let mut promoted = pilot(50);
    promoted.username = "ace-prime".to_string();
    promoted.equipped_modules = vec!["b".into()];
    store.save_player(&promoted).await.unwrap();

    let fetched = store.get_player("p1").await.unwrap().unwrap();
    assert_eq!(fetched.xp, 50);
    assert_eq!(fetched.username, "ace-prime");
    assert_eq!(module_ids(&fetched.equipped_modules), BTreeSet::from(["b".to_string()]));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_malformed_equipped_json_reads_as_empty() {
    let store = MemoryPlayerStore::new();
    let before = DecodeMetrics::failures(EQUIPPED_MODULES_COLUMN);

    store.insert_row(PlayerRow {
        player_id: "broken".to_string(),
        username: "glitch".to_string(),
        xp: 1,
        level: 1,
        currency: 0,
        equipped_modules_json: Some("not-json".to_string()),
        owned_modules_json: Some(r#"["a"]"#.to_string()),
    });

    let fetched = store.get_player("broken").await.unwrap().unwrap();
    assert!(fetched.equipped_modules.is_empty());
    assert_eq!(fetched.owned_modules, vec![ModuleRef::from("a")]);
    assert!(DecodeMetrics::failures(EQUIPPED_MODULES_COLUMN) > before);
}

#[tokio::test]
async fn test_update_keeps_elements_without_string_ids() {
    let store = MemoryPlayerStore::new();
    store.insert_row(PlayerRow {
        player_id: "legacy".to_string(),
        username: "veteran".to_string(),
        xp: 5,
        level: 2,
        currency: 40,
        equipped_modules_json: Some(r#"[{"module_id": 7}]"#.to_string()),
        owned_modules_json: Some(r#"[1, 2, "laser"]"#.to_string()),
    });

    let mut player = store.get_player("legacy").await.unwrap().unwrap();
    assert_eq!(player.owned_modules.len(), 3);
    assert_eq!(player.equipped_modules.len(), 1);

    player.xp += 100;
    assert_ok!(store.save_player(&player).await);

    let row = store.row("legacy").expect("row should exist");
    let owned: Value = serde_json::from_str(row.owned_modules_json.as_deref().unwrap()).unwrap();
    let equipped: Value =
        serde_json::from_str(row.equipped_modules_json.as_deref().unwrap()).unwrap();
    assert_eq!(owned, json!([1, 2, "laser"]));
    assert_eq!(equipped, json!([{"module_id": 7}]));
    assert_eq!(row.xp, 105);
}

#[tokio::test]
async fn test_whitespace_player_id_is_a_valid_key() {
    let store = MemoryPlayerStore::new();
    let mut player = pilot(1);
    player.player_id = " ".to_string();

    assert_ok!(store.save_player(&player).await);
    assert_eq!(store.get_player(" ").await.unwrap(), Some(player));
}

#[tokio::test]
async fn test_missing_player_is_none_not_default() {
    let store = MemoryPlayerStore::new();
    store.save_player(&pilot(10)).await.unwrap();

    assert_eq!(store.get_player("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_empty_player_id_is_rejected() {
    let store = MemoryPlayerStore::new();
    let result = store.get_player("").await;
    assert!(matches!(result, Err(DataError::InvalidInput(_))));
}

#[tokio::test]
async fn test_concurrent_saves_leave_one_record() {
    let store: Arc<dyn PlayerStore> = Arc::new(MemoryPlayerStore::new());

    let saves = (0..16).map(|xp| {
        let store = store.clone();
        async move { store.save_player(&pilot(xp)).await }
    });
    for result in join_all(saves).await {
        result.unwrap();
    }

    let fetched = store.get_player("p1").await.unwrap().unwrap();
    // Last writer wins; any of the written values is acceptable
    assert!((0..16).contains(&fetched.xp));
    assert_eq!(fetched.level, 3);
}

// =============================================================================
// Module Catalog Tests
// =============================================================================

#[tokio::test]
async fn test_empty_catalog_loads_empty() {
    let catalog = MemoryModuleCatalog::new();
    let modules = catalog.load_modules().await.unwrap();
    assert!(modules.is_empty());
}

#[tokio::test]
async fn test_invalid_stats_row_does_not_abort_load() {
    let catalog = MemoryModuleCatalog::from_rows([
        module_row("good", r#"{"damage": 12, "element": "heat"}"#),
        module_row("bad", "{oops"),
        module_row("also-good", r#"{"range": 3.5}"#),
    ]);

    let modules = catalog.load_modules().await.unwrap();
    assert_eq!(modules.len(), 3);

    let by_id = |id: &str| {
        modules
            .iter()
            .find(|m| m.module_id == id)
            .cloned()
            .expect("module should be loaded")
    };

    assert!(by_id("bad").stats.is_empty());
    assert_eq!(by_id("good").stat("damage"), Some(&StatValue::Integer(12)));
    assert_eq!(by_id("good").stat("element").and_then(StatValue::as_str), Some("heat"));
    assert_eq!(by_id("also-good").stat("range"), Some(&StatValue::Float(3.5)));
}

#[tokio::test]
async fn test_null_and_nested_stats_survive_load() {
    let catalog = MemoryModuleCatalog::from_rows([module_row(
        "shield",
        r#"{"hp": null, "resist": {"heat": 0.5}, "armor": 20}"#,
    )]);

    let module = catalog.get_module("shield").await.unwrap().unwrap();
    assert_eq!(module.stats.len(), 3);
    assert!(module.stat("hp").is_some_and(StatValue::is_null));
    assert_eq!(module.stat("resist"), Some(&StatValue::Other(json!({"heat": 0.5}))));
    assert_eq!(module.stat("armor"), Some(&StatValue::Integer(20)));
}

#[tokio::test]
async fn test_get_module_decodes_stats() {
    let catalog = MemoryModuleCatalog::from_rows([module_row("laser", r#"{"damage": 7}"#)]);
    let module = catalog.get_module("laser").await.unwrap().unwrap();
    assert_eq!(module.stat("damage").and_then(StatValue::as_f64), Some(7.0));
    assert_eq!(module.module_type, "weapon");
}

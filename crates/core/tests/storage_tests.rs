// ═══════════════════════════════════════════════════════════════════
// Storage Tests — session id validation, SessionSnapshot format,
// MemoryStore, JsonFileStore
// ═══════════════════════════════════════════════════════════════════

use chrono::Utc;

use commodity_desk_core::errors::CoreError;
use commodity_desk_core::models::alert::{AlertCondition, PriceAlert};
use commodity_desk_core::models::market::QuoteCache;
use commodity_desk_core::models::portfolio::{Portfolio, Position};
use commodity_desk_core::models::settings::Settings;
use commodity_desk_core::models::trade::{TradeLog, TradeSide};
use commodity_desk_core::models::watchlist::Watchlist;
use commodity_desk_core::storage::memory::MemoryStore;
use commodity_desk_core::storage::store::{validate_session_id, SessionSnapshot, SessionStore};

#[cfg(not(target_arch = "wasm32"))]
use commodity_desk_core::storage::file::JsonFileStore;

/// A snapshot with something in every field.
fn populated_snapshot() -> SessionSnapshot {
    let mut portfolio = Portfolio::new(99_000.0);
    portfolio
        .positions
        .insert("GOLD".into(), Position::new("GOLD", 10.0, 100.0));

    let mut trades = TradeLog::new();
    trades.record("GOLD", TradeSide::Buy, 10.0, 100.0, Utc::now());

    let mut settings = Settings::default();
    settings.api_keys.insert("api_ninjas".into(), "key".into());

    let mut quote_cache = QuoteCache::new();
    quote_cache.set_price("GOLD", 94_760.0, Utc::now());

    SessionSnapshot {
        portfolio,
        trades,
        watchlist: Watchlist::from_symbols(["GOLD", "SILVER"]),
        alerts: vec![PriceAlert::new("GOLD", AlertCondition::Above, 95_000.0)],
        settings,
        quote_cache,
    }
}

fn assert_snapshot_roundtrip(loaded: &SessionSnapshot) {
    assert_eq!(loaded.portfolio.cash, 99_000.0);
    assert_eq!(loaded.portfolio.position("GOLD").unwrap().quantity, 10.0);
    assert_eq!(loaded.trades.len(), 1);
    assert_eq!(loaded.trades.next_id(), 2);
    assert_eq!(loaded.watchlist.symbols(), ["GOLD", "SILVER"]);
    assert_eq!(loaded.alerts.len(), 1);
    assert_eq!(loaded.alerts[0].symbol, "GOLD");
    assert_eq!(
        loaded.settings.api_keys.get("api_ninjas").map(String::as_str),
        Some("key")
    );
    assert_eq!(loaded.quote_cache.price("GOLD"), Some(94_760.0));
}

// ═══════════════════════════════════════════════════════════════════
// Session id validation
// ═══════════════════════════════════════════════════════════════════

mod session_ids {
    use super::*;

    #[test]
    fn accepts_simple_ids() {
        for id in ["s1", "desk-1", "user_42", "ABC", "a"] {
            assert!(validate_session_id(id).is_ok(), "rejected {id}");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(validate_session_id("").is_err());
    }

    #[test]
    fn rejects_overlong() {
        let id = "x".repeat(65);
        assert!(validate_session_id(&id).is_err());
        assert!(validate_session_id(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn rejects_path_characters() {
        for id in ["../etc", "a/b", "a\\b", "a b", "a.json", "id!"] {
            let result = validate_session_id(id);
            assert!(
                matches!(result, Err(CoreError::InvalidArgument(_))),
                "accepted {id}"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// SessionSnapshot format
// ═══════════════════════════════════════════════════════════════════

mod snapshot_format {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let snapshot = populated_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let loaded: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_snapshot_roundtrip(&loaded);
    }

    #[test]
    fn optional_sections_default_when_missing() {
        // A record written before alerts/settings/quote cache existed
        let json = r#"{
            "portfolio": {"cash": 100000.0, "positions": {}},
            "trades": {"trades": [], "next_id": 1},
            "watchlist": {"symbols": ["GOLD"]}
        }"#;

        let loaded: SessionSnapshot = serde_json::from_str(json).unwrap();
        assert!(loaded.alerts.is_empty());
        assert_eq!(loaded.settings.starting_cash, 100_000.0);
        assert!(loaded.quote_cache.is_empty());
        assert_eq!(loaded.watchlist.symbols(), ["GOLD"]);
    }

    #[test]
    fn garbage_json_fails_to_parse() {
        let result: Result<SessionSnapshot, _> = serde_json::from_str("{\"cash\": 1}");
        assert!(result.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.list_sessions().unwrap().is_empty());
    }

    #[test]
    fn load_missing_session_is_none() {
        let store = MemoryStore::new();
        assert!(store.load("nope").unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let mut store = MemoryStore::new();
        store.save("desk-1", &populated_snapshot()).unwrap();

        let loaded = store.load("desk-1").unwrap().unwrap();
        assert_snapshot_roundtrip(&loaded);
    }

    #[test]
    fn save_overwrites_existing_record() {
        let mut store = MemoryStore::new();
        store.save("desk-1", &populated_snapshot()).unwrap();

        let mut snapshot = populated_snapshot();
        snapshot.portfolio.cash = 123.0;
        store.save("desk-1", &snapshot).unwrap();

        let loaded = store.load("desk-1").unwrap().unwrap();
        assert_eq!(loaded.portfolio.cash, 123.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn records_are_plain_json() {
        let mut store = MemoryStore::new();
        store.save("desk-1", &populated_snapshot()).unwrap();

        let raw = store.raw_record("desk-1").unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert!(value.get("portfolio").is_some());
        assert!(value.get("watchlist").is_some());
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = MemoryStore::new();
        store.save("desk-1", &populated_snapshot()).unwrap();

        assert!(store.delete("desk-1").unwrap());
        assert!(!store.delete("desk-1").unwrap());
        assert!(store.load("desk-1").unwrap().is_none());
    }

    #[test]
    fn list_sessions_sorted() {
        let mut store = MemoryStore::new();
        store.save("zeta", &populated_snapshot()).unwrap();
        store.save("alpha", &populated_snapshot()).unwrap();
        store.save("mid", &populated_snapshot()).unwrap();

        assert_eq!(store.list_sessions().unwrap(), ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn invalid_session_id_rejected_everywhere() {
        let mut store = MemoryStore::new();
        assert!(store.save("../oops", &populated_snapshot()).is_err());
        assert!(store.load("../oops").is_err());
        assert!(store.delete("../oops").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// JsonFileStore (native only)
// ═══════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use super::*;

    #[test]
    fn save_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("sessions");
        let mut store = JsonFileStore::new(&root);

        store.save("desk-1", &populated_snapshot()).unwrap();

        assert!(root.join("desk-1.json").exists());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        store.save("desk-1", &populated_snapshot()).unwrap();
        let loaded = store.load("desk-1").unwrap().unwrap();
        assert_snapshot_roundtrip(&loaded);
    }

    #[test]
    fn load_missing_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load("nope").unwrap().is_none());
    }

    #[test]
    fn files_are_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save("desk-1", &populated_snapshot()).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("desk-1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert!(value.get("trades").is_some());
        // Pretty-printed for hand inspection
        assert!(contents.contains('\n'));
    }

    #[test]
    fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save("desk-1", &populated_snapshot()).unwrap();

        assert!(store.delete("desk-1").unwrap());
        assert!(!dir.path().join("desk-1.json").exists());
        assert!(!store.delete("desk-1").unwrap());
    }

    #[test]
    fn list_sessions_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save("beta", &populated_snapshot()).unwrap();
        store.save("alpha", &populated_snapshot()).unwrap();

        // Unrelated files are ignored
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        assert_eq!(store.list_sessions().unwrap(), ["alpha", "beta"]);
    }

    #[test]
    fn list_sessions_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("never-created"));
        assert!(store.list_sessions().unwrap().is_empty());
    }

    #[test]
    fn invalid_session_id_never_touches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("sessions"));

        assert!(store.save("../escape", &populated_snapshot()).is_err());
        assert!(!dir.path().join("escape.json").exists());
    }
}

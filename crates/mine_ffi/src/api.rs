//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose item page actions (add/update/delete/list) to Dart via FRB.
//! - Own the process-level runtime and the single index view model.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All item actions go through `ItemIndexViewModel::dispatch`.
//! - The database path is fixed by the first successful configuration.

use mine_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DatabaseConfig, DbHandle, Item, ItemEvent, ItemIndexViewModel, LoadOutcome, SqliteItemStore,
};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tokio::runtime::Runtime;

const RUNTIME_WORKER_THREADS: usize = 2;

static ITEMS_DB_PATH: OnceCell<PathBuf> = OnceCell::new();
static ITEMS_RUNTIME: OnceCell<ItemsRuntime> = OnceCell::new();

struct ItemsRuntime {
    runtime: Runtime,
    view_model: ItemIndexViewModel<SqliteItemStore>,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Item shape crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub text: String,
    pub description: String,
    pub value: i64,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            text: item.text,
            description: item.description,
            value: item.value,
        }
    }
}

/// Result envelope for add/update/delete actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActionResponse {
    /// Whether the store confirmed the action.
    pub ok: bool,
    /// Addressed item ID.
    pub item_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ItemActionResponse {
    fn success(message: impl Into<String>, item_id: String) -> Self {
        Self {
            ok: true,
            item_id: Some(item_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>, item_id: String) -> Self {
        Self {
            ok: false,
            item_id: Some(item_id),
            message: message.into(),
        }
    }
}

/// Result envelope for list loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListResponse {
    pub items: Vec<ItemView>,
    /// `false` when the load failed or another load was still running.
    pub refreshed: bool,
    pub message: String,
}

/// Sets the database file used by item actions.
///
/// # FFI contract
/// - Must be called before the first item action to take effect.
/// - Repeating the same path is accepted; a different path is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn items_configure(db_path: String) -> String {
    let requested = PathBuf::from(db_path.trim());
    if requested.as_os_str().is_empty() {
        return "db_path cannot be empty".to_string();
    }

    let active = ITEMS_DB_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "items already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    String::new()
}

/// Reloads the list from the database and returns it.
#[flutter_rust_bridge::frb(sync)]
pub fn items_load() -> ItemListResponse {
    let runtime = match items_runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            return ItemListResponse {
                items: Vec::new(),
                refreshed: false,
                message: format!("items_load failed: {err}"),
            };
        }
    };

    let outcome = runtime.runtime.block_on(runtime.view_model.load_items());
    let (refreshed, message) = match outcome {
        LoadOutcome::Loaded(count) => (true, format!("Loaded {count} item(s).")),
        LoadOutcome::Skipped => (false, "Load already in progress.".to_string()),
        LoadOutcome::Failed => (false, "Load failed; see logs.".to_string()),
    };
    ItemListResponse {
        items: snapshot(runtime),
        refreshed,
        message,
    }
}

/// Returns the in-memory list without touching the database.
#[flutter_rust_bridge::frb(sync)]
pub fn items_snapshot() -> Vec<ItemView> {
    items_runtime().map(snapshot).unwrap_or_default()
}

/// Reads one item by ID from the database.
#[flutter_rust_bridge::frb(sync)]
pub fn item_read(id: String) -> Option<ItemView> {
    let runtime = items_runtime().ok()?;
    match runtime.runtime.block_on(runtime.view_model.read(id.trim())) {
        Ok(item) => item.map(ItemView::from),
        Err(err) => {
            log::warn!("event=ffi_item_read module=ffi status=error error={err}");
            None
        }
    }
}

/// Create page save: adds a new item with a generated ID.
///
/// Text and description are stored exactly as entered.
#[flutter_rust_bridge::frb(sync)]
pub fn item_add(text: String, description: String, value: i64) -> ItemActionResponse {
    let item = Item::new(text, description).with_value(value);
    let item_id = item.id.clone();
    dispatch("item_add", ItemEvent::AddItem(item), item_id, "Item added.")
}

/// Update page save: rewrites an existing item and reloads the list.
#[flutter_rust_bridge::frb(sync)]
pub fn item_update(
    id: String,
    text: String,
    description: String,
    value: i64,
) -> ItemActionResponse {
    let item = Item::with_id(id.trim(), text, description).with_value(value);
    let item_id = item.id.clone();
    dispatch("item_update", ItemEvent::UpdateItem(item), item_id, "Item updated.")
}

/// Delete page confirm: removes an existing item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_delete(id: String) -> ItemActionResponse {
    let item_id = id.trim().to_string();
    let item = Item::with_id(item_id.clone(), "", "");
    dispatch("item_delete", ItemEvent::DeleteItem(item), item_id, "Item deleted.")
}

fn dispatch(
    action: &str,
    event: ItemEvent,
    item_id: String,
    success_message: &str,
) -> ItemActionResponse {
    let runtime = match items_runtime() {
        Ok(runtime) => runtime,
        Err(err) => return ItemActionResponse::failure(format!("{action} failed: {err}"), item_id),
    };

    match runtime.runtime.block_on(runtime.view_model.dispatch(event)) {
        Ok(true) => ItemActionResponse::success(success_message, item_id),
        Ok(false) => ItemActionResponse::failure(
            format!("{action} failed: item rejected or not found"),
            item_id,
        ),
        Err(err) => ItemActionResponse::failure(format!("{action} failed: {err}"), item_id),
    }
}

fn snapshot(runtime: &ItemsRuntime) -> Vec<ItemView> {
    runtime
        .view_model
        .data_set()
        .snapshot()
        .into_iter()
        .map(ItemView::from)
        .collect()
}

fn resolve_items_db_path() -> PathBuf {
    ITEMS_DB_PATH
        .get_or_init(|| DatabaseConfig::from_env().path)
        .clone()
}

fn items_runtime() -> Result<&'static ItemsRuntime, String> {
    ITEMS_RUNTIME.get_or_try_init(|| {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(RUNTIME_WORKER_THREADS)
            .thread_name("mine-items")
            .enable_all()
            .build()
            .map_err(|err| format!("runtime start failed: {err}"))?;

        let config = DatabaseConfig::new(resolve_items_db_path());
        let db = DbHandle::open(&config).map_err(|err| format!("items DB open failed: {err}"))?;
        log::info!(
            "event=ffi_items_init module=ffi status=ok db_path={}",
            config.path.display()
        );

        Ok(ItemsRuntime {
            runtime,
            view_model: ItemIndexViewModel::new(SqliteItemStore::new(db)),
        })
    })
}

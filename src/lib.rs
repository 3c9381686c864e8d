//! Codecraft site core crate.
//!
//! The page script for the Codecraft wizarding site, compiled to WASM. The
//! house sorting quiz (`quiz`) is the only piece with real logic; it runs
//! against a [`quiz::Shell`] so it can be tested natively. Everything under
//! `dom` is thin event wiring around it and the smaller page widgets.

use wasm_bindgen::prelude::*;

pub mod config;
mod dom;
pub mod error;
pub mod quiz;
pub mod store;
pub mod widgets;

pub use config::SiteConfig;
pub use error::{QuizError, StoreError};
pub use quiz::{Category, QuestionBank, QuizEngine, ResultRecord, Shell};
pub use store::{KeyValueStore, LocalStore, MemoryStore};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Level can be changed later through `start_site_with_config`.
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Page entrypoints
// -----------------------------------------------------------------------------

/// Wire the page with the stock element ids.
#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    dom::start(SiteConfig::default())
}

/// Wire the page with a partial JSON override of [`SiteConfig`].
#[wasm_bindgen]
pub fn start_site_with_config(json: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if let Ok(level) = config.level() {
        log::set_max_level(level.to_level_filter());
    }
    dom::start(config)
}

#[wasm_bindgen]
pub fn open_quiz() {
    dom::with_engine(|e| e.open());
}

#[wasm_bindgen]
pub fn close_quiz() {
    dom::with_engine(|e| e.close());
}

#[wasm_bindgen]
pub fn restart_quiz() {
    dom::with_engine(|e| e.restart());
}

/// Stored sorting result as JSON (placeholder record when none is stored).
#[wasm_bindgen]
pub fn stored_result() -> String {
    let record = store::load_record_or_placeholder(&LocalStore, &dom::storage_key());
    serde_json::to_string(&record).unwrap_or_default()
}

/// Plain-text resume for the stored sorting result.
#[wasm_bindgen]
pub fn resume_summary() -> String {
    widgets::resume_text(&store::load_record_or_placeholder(
        &LocalStore,
        &dom::storage_key(),
    ))
}

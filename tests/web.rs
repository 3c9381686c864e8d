// Browser tests: run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use codecraft_site::store::{load_record, load_record_or_placeholder, save_record};
use codecraft_site::{
    Category, KeyValueStore, LocalStore, ResultRecord, start_site_with_config, stored_result,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let mut store = LocalStore;
    let record = ResultRecord::for_category(Category::Sec);
    save_record(&mut store, "codecraft_profile_test", &record);
    assert_eq!(load_record(&store, "codecraft_profile_test"), Some(record));
}

#[wasm_bindgen_test]
fn malformed_local_storage_value_gives_placeholder() {
    let mut store = LocalStore;
    store.set("codecraft_profile_bad", "{\"house\":").unwrap();
    assert_eq!(
        load_record_or_placeholder(&store, "codecraft_profile_bad"),
        ResultRecord::placeholder()
    );
}

#[wasm_bindgen_test]
fn stored_result_reads_the_configured_key() {
    let mut store = LocalStore;
    let record = ResultRecord::for_category(Category::Iot);
    save_record(&mut store, "codecraft_profile_custom", &record);
    save_record(
        &mut store,
        "codecraft_profile",
        &ResultRecord::for_category(Category::Team),
    );

    start_site_with_config(r#"{"storage_key": "codecraft_profile_custom"}"#).unwrap();
    let json = stored_result();
    assert_eq!(serde_json::from_str::<ResultRecord>(&json).unwrap(), record);
}

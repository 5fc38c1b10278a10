#![allow(dead_code)]

// tests/common/mod.rs
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Ids of a JSON array of games, in response order.
pub fn ids_of(json: &Value) -> Vec<String> {
    json.as_array()
        .expect("response body should be a JSON array")
        .iter()
        .map(|g| {
            g["id"]
                .as_str()
                .expect("game id should be a string")
                .to_string()
        })
        .collect()
}

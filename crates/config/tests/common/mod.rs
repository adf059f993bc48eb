#![allow(dead_code)]

use bnovo_config::SettingsDocument;
use serde_json::Value as Json;

/// The bundled definition as a JSON tree, ready to be tampered with.
pub fn builtin_json() -> Json {
    SettingsDocument::builtin()
        .unwrap()
        .to_definition()
        .to_value()
        .unwrap()
}

/// Object holding the last segment of a dotted path, plus that segment.
fn parent<'a>(
    json: &'a mut Json,
    path: &'a str,
) -> (&'a mut serde_json::Map<String, Json>, &'a str) {
    let (head, last) = match path.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, path),
    };

    let mut node = json;
    if let Some(head) = head {
        for segment in head.split('.') {
            node = node
                .get_mut(segment)
                .unwrap_or_else(|| panic!("no record '{segment}' in definition"));
        }
    }
    (node.as_object_mut().expect("record"), last)
}

pub fn remove_path(json: &mut Json, path: &str) {
    let (object, key) = parent(json, path);
    assert!(object.remove(key).is_some(), "key '{path}' not in definition");
}

pub fn set_path(json: &mut Json, path: &str, value: Json) {
    let (object, key) = parent(json, path);
    object.insert(key.to_string(), value);
}

pub fn fixtures_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

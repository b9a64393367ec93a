pub mod engine;
pub mod error;
pub mod pitch;
pub mod scanner;
pub mod token;

pub use crate::engine::{detect_key, extract_chords, transpose, validate_chords};
pub use crate::error::TransposeError;
pub use crate::pitch::{Accidental, KEY_LABELS};
pub use crate::token::ChordToken;

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the chordshift-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: transpose chord text between keys. `accidentals` is
/// "flat" for flat spellings, anything else for sharps.
#[wasm_bindgen]
pub fn transpose_song(
    input: &str,
    from_key: &str,
    to_key: &str,
    accidentals: &str,
) -> Result<String, JsValue> {
    engine::transpose(input, from_key, to_key, Accidental::from_name(accidentals))
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: heuristic key guess for a chord sheet.
#[wasm_bindgen]
pub fn detect_song_key(input: &str) -> String {
    engine::detect_key(input)
}

/// WASM-exposed: the unique chord tokens of a text as a JS string array.
#[wasm_bindgen]
pub fn extract_song_chords(input: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&engine::extract_chords(input))
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: does the text contain at least one chord token?
#[wasm_bindgen]
pub fn validate_song_chords(input: &str) -> bool {
    engine::validate_chords(input)
}

/// WASM-exposed: the 12 selectable key labels for the key pickers
/// ("C", "C#/Db", ...).
#[wasm_bindgen]
pub fn song_keys() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&KEY_LABELS.to_vec())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

//! # Directory Source
//!
//! `ContentSource` over a local dump of the upstream API.
//!
//! ## Layout
//!
//! ```text
//! <root>/static/avatarCurve.json
//! <root>/static/weaponCurve.json
//! <root>/<lang>/avatar.json
//! <root>/<lang>/avatar/<id>.json
//! <root>/<lang>/weapon.json
//! <root>/<lang>/weapon/<id>.json
//! ```
//!
//! Every file holds the response envelope `{"response": 200, "data": ...}`.
//! A response code other than 200 is a `SourceError`; a payload that does
//! not match its record shape is an `InvalidRecord`.

use amber_core::records::{RawCharacterDetail, RawCharacterIndex, RawWeaponDetail, RawWeaponIndex};
use amber_core::{AmberError, ContentSource, CurveFeed};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Response code of a successful envelope.
pub const RESPONSE_OK: i64 = 200;

/// Curve feeds, in merge order.
pub const CURVE_FEEDS: [&str; 2] = ["avatarCurve", "weaponCurve"];

/// Maximum size of a single dump file (64 MB).
const MAX_DUMP_FILE_SIZE: u64 = 64 * 1024 * 1024;

// =============================================================================
// ENVELOPE
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope {
    response: i64,
    #[serde(default)]
    data: serde_json::Value,
}

/// Unwrap an envelope and decode its payload.
///
/// `origin` names the document in error messages.
pub fn decode_envelope<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, AmberError> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| AmberError::SourceError(format!("{}: malformed envelope: {}", origin, e)))?;

    if envelope.response != RESPONSE_OK {
        return Err(AmberError::SourceError(format!(
            "{}: response {} ({})",
            origin, envelope.response, envelope.data
        )));
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| AmberError::InvalidRecord(format!("{}: {}", origin, e)))
}

// =============================================================================
// JSON DIRECTORY SOURCE
// =============================================================================

/// Reads feed dumps from a directory tree.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
    language: String,
}

impl JsonDirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            language: language.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    fn static_path(&self, name: &str) -> PathBuf {
        self.root.join("static").join(format!("{}.json", name))
    }

    fn localized_path(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.root.join(&self.language);
        for segment in segments {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T, AmberError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            AmberError::IoError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_DUMP_FILE_SIZE {
            return Err(AmberError::IoError(format!(
                "'{}' is {} bytes, maximum is {}",
                path.display(),
                metadata.len(),
                MAX_DUMP_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            AmberError::IoError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "dump read");
        decode_envelope(&text, &path.display().to_string())
    }
}

impl ContentSource for JsonDirSource {
    fn curve_feeds(&self) -> Result<Vec<CurveFeed>, AmberError> {
        CURVE_FEEDS
            .iter()
            .map(|name| self.read(&self.static_path(name)))
            .collect()
    }

    fn character_index(&self) -> Result<RawCharacterIndex, AmberError> {
        self.read(&self.localized_path(&["avatar"]))
    }

    fn character_detail(&self, id: &str) -> Result<RawCharacterDetail, AmberError> {
        self.read(&self.localized_path(&["avatar", id]))
    }

    fn weapon_index(&self) -> Result<RawWeaponIndex, AmberError> {
        self.read(&self.localized_path(&["weapon"]))
    }

    fn weapon_detail(&self, id: u32) -> Result<RawWeaponDetail, AmberError> {
        self.read(&self.localized_path(&["weapon", &id.to_string()]))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwraps_data() {
        let feed: CurveFeed = decode_envelope(
            r#"{"response": 200, "data": {"1": {"curveInfos": {"GROW_A": 1.0}}}}"#,
            "test",
        )
        .expect("decode");
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn non_ok_response_is_source_error() {
        let result: Result<CurveFeed, _> =
            decode_envelope(r#"{"response": 404, "data": "Not Found"}"#, "test");
        assert!(matches!(result, Err(AmberError::SourceError(msg)) if msg.contains("404")));
    }

    #[test]
    fn payload_shape_mismatch_is_invalid_record() {
        let result: Result<RawCharacterIndex, _> =
            decode_envelope(r#"{"response": 200, "data": {"items": 3}}"#, "test");
        assert!(matches!(result, Err(AmberError::InvalidRecord(_))));
    }

    #[test]
    fn localized_paths_follow_api_layout() {
        let source = JsonDirSource::new("/dump", "en");
        assert_eq!(
            source.localized_path(&["avatar", "10000046"]),
            PathBuf::from("/dump/en/avatar/10000046.json")
        );
        assert_eq!(
            source.static_path("weaponCurve"),
            PathBuf::from("/dump/static/weaponCurve.json")
        );
    }
}

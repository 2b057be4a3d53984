//! Entry points for callers that hand over loosely-typed JSON.
//!
//! Accepts `{ "files" | "currentFiles": {...}, "startFile", "searchPattern", "maxDepth"? }`
//! and reports every malformed input through [`ScanResult::error`].

use serde_json::Value;

use crate::observer::{NoopObserver, ScanObserver};
use crate::scanner::GraphScanner;
use crate::{FileSnapshot, ScanRequest, ScanResult, DEFAULT_MAX_DEPTH};

const INVALID_FILES: &str = "Invalid currentFiles object";

impl FileSnapshot {
    /// Build a snapshot from a JSON object of path -> text.
    ///
    /// Returns `None` if `value` is not an object. Non-string contents are
    /// kept (`null` as empty text, anything else as its compact JSON) and
    /// marked opaque, so they are searched but never parsed for imports.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut snapshot = Self::default();
        for (path, content) in object {
            let text = match content {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            if !content.is_string() {
                snapshot.opaque.insert(path.clone());
            }
            snapshot.files.insert(path.clone(), text);
        }
        Some(snapshot)
    }
}

fn string_field<'a>(value: &'a Value, key: &str) -> Result<&'a str, String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Invalid scan request: `{}` must be a string", key))
}

/// Non-negative integer, also accepting whole floats like `2.0`.
fn max_depth_field(value: &Value, default_max_depth: usize) -> usize {
    let Some(depth) = value.get("maxDepth") else {
        return default_max_depth;
    };
    depth
        .as_u64()
        .or_else(|| {
            depth
                .as_f64()
                .filter(|d| d.is_finite() && *d >= 0.0 && d.fract() == 0.0)
                .map(|d| d as u64)
        })
        .map(|d| usize::try_from(d).unwrap_or(usize::MAX))
        .unwrap_or(default_max_depth)
}

fn parse_request(
    value: &Value,
    loaded: Option<&FileSnapshot>,
    default_max_depth: usize,
) -> Result<ScanRequest, String> {
    let snapshot = match value.get("files").or_else(|| value.get("currentFiles")) {
        Some(files) => FileSnapshot::from_value(files).ok_or_else(|| INVALID_FILES.to_string())?,
        None => loaded.cloned().ok_or_else(|| INVALID_FILES.to_string())?,
    };

    let start_file = string_field(value, "startFile")?;
    let search_pattern = string_field(value, "searchPattern")?;
    let max_depth = max_depth_field(value, default_max_depth);

    Ok(ScanRequest::from_snapshot(snapshot, start_file, search_pattern).with_max_depth(max_depth))
}

impl GraphScanner {
    /// Scan a JSON request, reporting progress to `observer`.
    pub fn scan_json_with<O>(&self, value: &Value, observer: &mut O) -> ScanResult
    where
        O: ScanObserver + ?Sized,
    {
        self.scan_json_over(value, None, DEFAULT_MAX_DEPTH, observer)
    }

    /// Scan a JSON request against an already loaded project.
    ///
    /// Inline `files`/`currentFiles` win over `loaded`; without either the
    /// request is invalid. `default_max_depth` applies when `maxDepth` is
    /// absent or not a non-negative integer.
    pub fn scan_json_over<O>(
        &self,
        value: &Value,
        loaded: Option<&FileSnapshot>,
        default_max_depth: usize,
        observer: &mut O,
    ) -> ScanResult
    where
        O: ScanObserver + ?Sized,
    {
        match parse_request(value, loaded, default_max_depth) {
            Ok(request) => self.scan_with(&request, observer),
            Err(message) => {
                let result = ScanResult::failure(message);
                observer.on_finish(&result);
                result
            }
        }
    }

    /// Scan a JSON request.
    pub fn scan_json(&self, value: &Value) -> ScanResult {
        self.scan_json_with(value, &mut NoopObserver)
    }
}

/// Scan a JSON request with the default scanner.
pub fn scan_json(value: &Value) -> ScanResult {
    GraphScanner::new().scan_json(value)
}

//! Signature file loading and shape validation
//!
//! Each signature file is a JSON document produced by the upstream profiler.
//! Only the `signature` field matters here; any other profiler output in the
//! document is ignored.

use crate::error::{AtlasError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk shape of a signature document
#[derive(Debug, Deserialize)]
struct SignatureDoc {
    #[serde(default)]
    signature: Option<Vec<f32>>,
}

/// Load one signature file and validate its shape.
///
/// The document must carry a non-empty numeric `signature` array. Bad JSON, a
/// missing field, a wrong type or an empty array all produce a recoverable
/// [`AtlasError::Signature`]; the caller decides whether to skip.
pub fn read_signature(path: &Path) -> Result<Vec<f32>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AtlasError::signature(path, format!("read failed: {}", e)))?;

    let doc: SignatureDoc = serde_json::from_str(&content)
        .map_err(|e| AtlasError::signature(path, format!("malformed document: {}", e)))?;

    let signature = doc
        .signature
        .ok_or_else(|| AtlasError::signature(path, "missing `signature` array"))?;

    if signature.is_empty() {
        return Err(AtlasError::signature(path, "`signature` array is empty"));
    }

    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("create fixture");
        file.write_all(content.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn test_valid_signature() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_file(
            &dir,
            "m_dna.json",
            r#"{"signature": [0.1, 0.2, 0.3], "other": "ignored"}"#,
        );
        let sig = read_signature(&path).expect("valid signature");
        assert_eq!(sig.len(), 3);
        assert!((sig[0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_integer_elements_are_accepted() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_file(&dir, "m_dna.json", r#"{"signature": [1, 2, 3]}"#);
        assert_eq!(read_signature(&path).expect("numeric array"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_signature_field() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_file(&dir, "m_dna.json", r#"{"something": 1}"#);
        let err = read_signature(&path).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_empty_signature_array() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_file(&dir, "m_dna.json", r#"{"signature": []}"#);
        let err = read_signature(&path).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_non_array_signature() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_file(&dir, "m_dna.json", r#"{"signature": "not a list"}"#);
        assert!(read_signature(&path).unwrap_err().is_recoverable());
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_file(&dir, "m_dna.json", "{not json");
        assert!(read_signature(&path).unwrap_err().is_recoverable());
    }
}

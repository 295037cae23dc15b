//! Directory scanning for signature files
//!
//! Thin wrapper around a recursive walk: selects files matching the
//! signature-file naming pattern, excludes dry-run outputs, and derives the
//! per-file identifiers and quality signals the pipeline consumes.

use crate::config::InputConfig;
use crate::error::{AtlasError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect signature files under the configured input directory.
///
/// Traversal is sorted by file name so runs over the same tree visit files in
/// a stable order. A missing input directory is fatal and reported before any
/// scanning.
pub fn find_signature_files(config: &InputConfig) -> Result<Vec<PathBuf>> {
    if !config.dir.is_dir() {
        return Err(AtlasError::config(format!(
            "input directory not found: {}",
            config.dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&config.dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            AtlasError::config(format!("failed to scan {}: {}", config.dir.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(&config.signature_suffix) || name.ends_with(&config.dryrun_suffix) {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Derive the raw file-derived model name from a signature file path: the
/// file name with the signature suffix removed. This is the deduplication key.
pub fn file_id(path: &Path, signature_suffix: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(signature_suffix).map(str::to_string)
}

/// Quality signal used to break deduplication ties: 1 when the path contains
/// "embed" anywhere (case-insensitive), else 0. Signatures produced by the
/// embedding variant of the profiler are preferred over the default variant.
pub fn quality_signal(path: &Path) -> u8 {
    if path.to_string_lossy().to_lowercase().contains("embed") {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputConfig;
    use std::fs;
    use tempfile::TempDir;

    fn input_config(dir: &TempDir) -> InputConfig {
        InputConfig {
            dir: dir.path().to_path_buf(),
            ..InputConfig::default()
        }
    }

    #[test]
    fn test_scan_filters_and_recurses() {
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("embed")).expect("mkdir");
        fs::write(dir.path().join("a_dna.json"), "{}").expect("write");
        fs::write(dir.path().join("embed/b_dna.json"), "{}").expect("write");
        fs::write(dir.path().join("notes.txt"), "x").expect("write");
        fs::write(dir.path().join("c.json"), "{}").expect("write");

        let files = find_signature_files(&input_config(&dir)).expect("scan");
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.to_string_lossy().ends_with("_dna.json")));
    }

    #[test]
    fn test_dryrun_files_are_excluded() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a_dna.json"), "{}").expect("write");
        fs::write(dir.path().join("b_dna_DRYRUN.json"), "{}").expect("write");

        let config = InputConfig {
            dir: dir.path().to_path_buf(),
            signature_suffix: ".json".to_string(),
            dryrun_suffix: "_DRYRUN.json".to_string(),
        };
        let files = find_signature_files(&config).expect("scan");
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().ends_with("a_dna.json"));
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let config = InputConfig {
            dir: PathBuf::from("/nonexistent/atlas-input"),
            ..InputConfig::default()
        };
        let err = find_signature_files(&config).unwrap_err();
        assert!(matches!(err, AtlasError::Config { .. }));
    }

    #[test]
    fn test_file_id_strips_suffix() {
        let path = Path::new("data/org_model-7b_dna.json");
        assert_eq!(
            file_id(path, "_dna.json"),
            Some("org_model-7b".to_string())
        );
        assert_eq!(file_id(Path::new("data/other.json"), "_dna.json"), None);
    }

    #[test]
    fn test_quality_signal_from_path() {
        assert_eq!(quality_signal(Path::new("out/embed/m_dna.json")), 1);
        assert_eq!(quality_signal(Path::new("out/EMBEDDINGS/m_dna.json")), 1);
        assert_eq!(quality_signal(Path::new("out/default/m_dna.json")), 0);
    }
}

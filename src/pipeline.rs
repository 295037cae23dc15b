//! Pipeline orchestration
//!
//! Drives one batch run end to end: scan the input tree, resolve each
//! signature file to a model identity, deduplicate repeated runs, reduce the
//! retained signatures to 2-D coordinates, and assemble the output database.
//! Every step failure is fatal except per-file read errors, which are logged
//! and skipped.

use crate::config::Config;
use crate::dedup::Deduplicator;
use crate::embed::Reducer;
use crate::error::{AtlasError, Result};
use crate::identity;
use crate::record::{self, Database, ModelRecord};
use crate::scan;
use crate::signature;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Minimum number of retained models; the reduction is undefined below this
const MIN_MODELS: usize = 2;

/// Run the full pipeline and return the assembled database.
///
/// The deduplication table is created here and dropped when the run ends, so
/// the pipeline can be invoked repeatedly within one process.
pub fn run(config: &Config, reducer: &dyn Reducer) -> Result<Database> {
    let files = scan::find_signature_files(&config.input)?;
    info!(
        files = files.len(),
        dir = %config.input.dir.display(),
        "scanned input directory"
    );

    let mut dedup = Deduplicator::new();
    for path in &files {
        let Some(file_id) = scan::file_id(path, &config.input.signature_suffix) else {
            warn!(path = %path.display(), "skipping file with unusable name");
            continue;
        };
        let sig = match signature::read_signature(path) {
            Ok(sig) => sig,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping signature file");
                continue;
            }
        };
        let quality = scan::quality_signal(path);
        let resolved = identity::resolve(&file_id);
        let record = ModelRecord::new(&file_id, resolved, sig);
        debug!(id = %record.id, quality, "admitting candidate");
        dedup.admit(file_id, quality, record);
    }

    let mut models = dedup.finalize();
    if models.len() < MIN_MODELS {
        return Err(AtlasError::InsufficientData {
            found: models.len(),
        });
    }
    let dims = record::validate_uniform_dimensions(&models)?;
    info!(models = models.len(), dims, "retained deduplicated models");

    // The matrix rows must follow `models` order exactly; coordinates are
    // assigned back by position.
    let matrix: Vec<Vec<f32>> = models.iter().map(|m| m.signature.clone()).collect();
    let coordinates = reducer.reduce(&matrix)?;
    record::assign_coordinates(&mut models, &coordinates)?;

    let database = Database::new(&config.output.dataset, models);
    info!(
        models = database.metadata.count,
        organizations = database.organizations().len(),
        "assembled database"
    );
    Ok(database)
}

/// Serialize the database as pretty-printed JSON, creating parent
/// directories as needed
pub fn write_database(database: &Database, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(database)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "database written");
    Ok(())
}

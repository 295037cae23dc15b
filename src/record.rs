//! Output records and the consolidated database document

use crate::error::{AtlasError, Result};
use crate::identity::{Family, ModelIdentity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One retained model in the output database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Composed `<organization>/<display name>` identifier
    pub id: String,
    /// Raw file-derived name; also the deduplication key
    pub name: String,
    pub organization: String,
    pub family: Family,
    pub signature: Vec<f32>,
    /// Parameter count such as "7B", or "Unknown"
    pub parameters: String,
    #[serde(rename = "isInstruct")]
    pub is_instruct: bool,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl ModelRecord {
    /// Build a record from a resolved identity and its signature vector.
    /// Coordinates stay at the origin until the embedding stage assigns them.
    pub fn new(raw_name: &str, identity: ModelIdentity, signature: Vec<f32>) -> Self {
        Self {
            id: identity.id(),
            name: raw_name.to_string(),
            organization: identity.organization,
            family: identity.family,
            signature,
            parameters: identity.parameter_size,
            is_instruct: identity.is_instruct,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Database metadata block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub count: usize,
    pub dataset: String,
    pub generated: bool,
}

/// The consolidated output document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub metadata: Metadata,
    pub models: Vec<ModelRecord>,
}

impl Database {
    pub fn new(dataset: &str, models: Vec<ModelRecord>) -> Self {
        Self {
            metadata: Metadata {
                count: models.len(),
                dataset: dataset.to_string(),
                generated: true,
            },
            models,
        }
    }

    /// Distinct organizations across all models, sorted
    pub fn organizations(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|m| m.organization.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Require every retained signature to share one dimensionality and return
/// it. A mismatch indicates upstream corruption and is fatal; it must not be
/// coerced per record.
pub fn validate_uniform_dimensions(records: &[ModelRecord]) -> Result<usize> {
    let expected = records.first().map(|r| r.signature.len()).unwrap_or(0);
    for record in records {
        if record.signature.len() != expected {
            return Err(AtlasError::DimensionMismatch {
                name: record.name.clone(),
                expected,
                found: record.signature.len(),
            });
        }
    }
    Ok(expected)
}

/// Assign embedding coordinates to records by positional index.
///
/// The lengths must match exactly; truncating or padding would silently
/// misalign models and coordinates. The caller must derive the embedding
/// input matrix directly from `records` in the same order.
pub fn assign_coordinates(records: &mut [ModelRecord], coordinates: &[(f32, f32)]) -> Result<()> {
    if records.len() != coordinates.len() {
        return Err(AtlasError::CoordinateMismatch {
            records: records.len(),
            coordinates: coordinates.len(),
        });
    }
    for (record, &(x, y)) in records.iter_mut().zip(coordinates) {
        record.x = x;
        record.y = y;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity;

    fn record(raw_name: &str, signature: Vec<f32>) -> ModelRecord {
        ModelRecord::new(raw_name, identity::resolve(raw_name), signature)
    }

    #[test]
    fn test_record_from_identity() {
        let rec = record("Qwen2.5-7B-Chat", vec![1.0, 2.0]);
        assert_eq!(rec.id, "Qwen/Qwen2.5-7B-Chat");
        assert_eq!(rec.name, "Qwen2.5-7B-Chat");
        assert_eq!(rec.organization, "Qwen");
        assert!(rec.is_instruct);
        assert_eq!(rec.x, 0.0);
        assert_eq!(rec.y, 0.0);
    }

    #[test]
    fn test_uniform_dimensions() {
        let records = vec![record("a_m1", vec![1.0, 2.0]), record("b_m2", vec![3.0, 4.0])];
        assert_eq!(validate_uniform_dimensions(&records).expect("uniform"), 2);

        let records = vec![record("a_m1", vec![1.0, 2.0]), record("b_m2", vec![3.0])];
        let err = validate_uniform_dimensions(&records).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::DimensionMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_assign_coordinates_by_position() {
        let mut records = vec![record("a_m1", vec![1.0]), record("b_m2", vec![2.0])];
        assign_coordinates(&mut records, &[(0.5, -0.5), (1.5, -1.5)]).expect("aligned");
        assert_eq!(records[0].x, 0.5);
        assert_eq!(records[1].y, -1.5);
    }

    #[test]
    fn test_assign_coordinates_rejects_mismatch() {
        let mut records = vec![record("a_m1", vec![1.0]), record("b_m2", vec![2.0])];
        let err = assign_coordinates(&mut records, &[(0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::CoordinateMismatch {
                records: 2,
                coordinates: 1
            }
        ));
        // Nothing was assigned.
        assert_eq!(records[0].x, 0.0);
    }

    #[test]
    fn test_organizations_sorted_and_deduplicated() {
        let db = Database::new(
            "test",
            vec![
                record("zeta_m1", vec![1.0]),
                record("Alpha_m2", vec![2.0]),
                record("zeta_m3", vec![3.0]),
            ],
        );
        assert_eq!(db.metadata.count, 3);
        assert_eq!(db.organizations(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let rec = record("a_m1", vec![1.0]);
        let json = serde_json::to_value(&rec).expect("serialize");
        assert!(json.get("isInstruct").is_some());
        assert!(json.get("parameters").is_some());
        assert!(json.get("is_instruct").is_none());
    }
}

//! Dimensionality reduction of signature matrices to plot coordinates
//!
//! The reduction algorithm is an external collaborator behind the [`Reducer`]
//! trait: N equal-length rows in, exactly N `(x, y)` pairs out, row order
//! preserved. The production implementation wraps t-SNE from the `aprender`
//! crate; tests inject stub reducers through the trait seam.

use crate::error::{AtlasError, Result};
use aprender::preprocessing::TSNE;
use aprender::primitives::Matrix;
use aprender::traits::Transformer;

/// Fixed seed so repeated runs over the same dataset agree
const RANDOM_STATE: u64 = 42;

/// Maps an N x D signature matrix to N 2-D coordinates, preserving row order
pub trait Reducer {
    fn reduce(&self, matrix: &[Vec<f32>]) -> Result<Vec<(f32, f32)>>;
}

/// t-SNE backed reducer
#[derive(Debug, Clone)]
pub struct TsneReducer {
    seed: u64,
}

impl TsneReducer {
    pub fn new() -> Self {
        Self { seed: RANDOM_STATE }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for TsneReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TsneReducer {
    fn reduce(&self, matrix: &[Vec<f32>]) -> Result<Vec<(f32, f32)>> {
        let n = matrix.len();
        if n < 2 {
            return Err(AtlasError::InsufficientData { found: n });
        }
        let dims = matrix[0].len();

        let flat: Vec<f32> = matrix.iter().flat_map(|row| row.iter().copied()).collect();
        let data = Matrix::from_vec(n, dims, flat).map_err(AtlasError::embedding)?;

        // Perplexity must stay below the sample count.
        let perplexity = 30.0_f32.min((n - 1) as f32);
        let mut tsne = TSNE::new(2)
            .with_perplexity(perplexity)
            .with_random_state(self.seed);

        let embedding = tsne
            .fit_transform(&data)
            .map_err(|e| AtlasError::embedding(e.to_string()))?;

        Ok((0..n)
            .map(|i| (embedding.get(i, 0), embedding.get(i, 1)))
            .collect())
    }
}

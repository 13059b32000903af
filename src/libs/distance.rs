use anyhow::Result;
use rayon::prelude::*;

use crate::libs::alignment::{Alignment, AlnError};

/// A dense symmetric distance matrix over named taxa.
///
/// The diagonal is always 0 and `set` writes both triangles, so
/// `get(i, j) == get(j, i)` holds by construction.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn new(names: Vec<String>) -> Self {
        let n = names.len();
        Self {
            names,
            values: vec![vec![0.0; n]; n],
        }
    }

    /// Number of taxa.
    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn get_names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i][j] = value;
        self.values[j][i] = value;
    }

    /// Serialize as a relaxed PHYLIP matrix: a count line, then one
    /// whitespace-separated row per taxon.
    ///
    /// # Example
    /// ```
    /// use pacon::libs::distance::DistanceMatrix;
    /// let mut matrix = DistanceMatrix::new(vec!["A".to_string(), "B".to_string()]);
    /// matrix.set(0, 1, 0.25);
    /// let phylip = matrix.to_phylip();
    /// assert_eq!(phylip, "2\nA\t0.0000\t0.2500\nB\t0.2500\t0.0000\n");
    /// ```
    pub fn to_phylip(&self) -> String {
        let mut out = format!("{}\n", self.size());
        for (i, name) in self.names.iter().enumerate() {
            out.push_str(name);
            for j in 0..self.size() {
                out.push_str(&format!("\t{:.4}", self.get(i, j)));
            }
            out.push('\n');
        }
        out
    }
}

/// Compute the identity distance matrix of an alignment.
///
/// For each unordered pair, distance = (mismatching columns) / width, a
/// proportion in [0, 1]. Rows of the upper triangle are independent and are
/// computed in parallel.
///
/// # Errors
/// `AlnError::ZeroWidth` when the alignment has no columns, as the
/// proportion is undefined.
pub fn identity_distance(aln: &Alignment) -> Result<DistanceMatrix> {
    let width = aln.width();
    if width == 0 {
        return Err(AlnError::ZeroWidth.into());
    }

    let n = aln.len();
    let seqs = aln.sequences();

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| {
                    let mismatches = seqs[i]
                        .symbols()
                        .iter()
                        .zip(seqs[j].symbols().iter())
                        .filter(|(a, b)| a != b)
                        .count();
                    mismatches as f64 / width as f64
                })
                .collect()
        })
        .collect();

    let mut matrix = DistanceMatrix::new(aln.names());
    for (i, row) in rows.iter().enumerate() {
        for (k, &d) in row.iter().enumerate() {
            matrix.set(i, i + 1 + k, d);
        }
    }

    Ok(matrix)
}

use anyhow::Result;
use itertools::Itertools;

use crate::libs::alignment::{Alignment, AlnError};

/// Compute per-column conservation scores.
///
/// The score of a column is the frequency of its most common symbol,
/// `max_count / n_sequences`, so each value lies in [1/N, 1] and equals 1
/// exactly when all rows agree. When several symbols share the maximum
/// count, the smallest byte value wins; the result therefore does not
/// depend on row order.
///
/// # Errors
/// `AlnError::ZeroWidth` when the alignment has no columns.
///
/// # Example
/// ```
/// use pacon::libs::alignment::{Alignment, Sequence};
/// use pacon::libs::conservation;
///
/// let aln = Alignment::new(vec![
///     Sequence::new("A", b"AC".to_vec()),
///     Sequence::new("B", b"AG".to_vec()),
/// ])
/// .unwrap();
///
/// let scores = conservation::scores(&aln).unwrap();
/// assert_eq!(scores, vec![1.0, 0.5]);
/// ```
pub fn scores(aln: &Alignment) -> Result<Vec<f64>> {
    let width = aln.width();
    if width == 0 {
        return Err(AlnError::ZeroWidth.into());
    }

    let n = aln.len() as f64;

    let mut out = Vec::with_capacity(width);
    for c in 0..width {
        let counts = aln.column(c).into_iter().counts();
        let (_, &count) = counts
            .iter()
            .max_by_key(|&(sym, count)| (*count, std::cmp::Reverse(*sym)))
            .unwrap();
        out.push(count as f64 / n);
    }

    Ok(out)
}

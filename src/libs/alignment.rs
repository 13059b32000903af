use std::fmt;
use std::io::BufRead;

use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlnError {
    /// Fewer than 2 records were parsed from the input
    InsufficientSequences(usize),
    /// A record's length disagrees with the first record's length
    UnequalLength {
        name: String,
        expected: usize,
        found: usize,
    },
    /// Alignment has no columns; distances and scores are undefined
    ZeroWidth,
}

impl fmt::Display for AlnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlnError::InsufficientSequences(n) => {
                write!(f, "insufficient sequences: expected at least 2, found {}", n)
            }
            AlnError::UnequalLength {
                name,
                expected,
                found,
            } => {
                write!(
                    f,
                    "sequence \"{}\" has length {}, but the alignment width is {}",
                    name, found, expected
                )
            }
            AlnError::ZeroWidth => write!(f, "alignment has zero columns"),
        }
    }
}

impl std::error::Error for AlnError {}

/// A named, immutable row of an alignment.
///
/// Symbols are raw bytes; nucleotides, amino acids and gap characters (`-`)
/// are all treated alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    symbols: Vec<u8>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, symbols: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// An ordered set of equal-length sequences.
///
/// The equal-length invariant is checked at construction, so every consumer
/// can index columns without re-validating.
#[derive(Debug, Clone)]
pub struct Alignment {
    sequences: Vec<Sequence>,
}

impl Alignment {
    /// Build an alignment from already-parsed sequences.
    ///
    /// # Errors
    /// * `InsufficientSequences` with fewer than 2 entries.
    /// * `UnequalLength` when any entry's length differs from the first's.
    pub fn new(sequences: Vec<Sequence>) -> std::result::Result<Self, AlnError> {
        if sequences.len() < 2 {
            return Err(AlnError::InsufficientSequences(sequences.len()));
        }

        let expected = sequences[0].len();
        for seq in &sequences[1..] {
            if seq.len() != expected {
                return Err(AlnError::UnequalLength {
                    name: seq.name().to_string(),
                    expected,
                    found: seq.len(),
                });
            }
        }

        Ok(Self { sequences })
    }

    /// Parse FASTA text into an alignment, preserving record order.
    ///
    /// Multi-line records are concatenated; the record name is the text of
    /// the `>` line up to the first whitespace.
    ///
    /// # Example
    /// ```
    /// use pacon::libs::alignment::Alignment;
    /// let text = ">A\nACGT\n>B\nACGA\n";
    /// let aln = Alignment::from_fasta(text.as_bytes()).unwrap();
    /// assert_eq!(aln.len(), 2);
    /// assert_eq!(aln.width(), 4);
    /// assert_eq!(aln.sequences()[0].name(), "A");
    /// ```
    pub fn from_fasta<R: BufRead>(rdr: R) -> Result<Self> {
        let mut fa_in = noodles_fasta::io::Reader::new(rdr);

        let mut sequences = Vec::new();
        for result in fa_in.records() {
            let record = result?;
            let name = String::from_utf8(record.name().into())?;
            let symbols = record.sequence().get(..).unwrap().to_vec();
            sequences.push(Sequence::new(name, symbols));
        }

        Ok(Self::new(sequences)?)
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Number of sequences (rows).
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Number of columns. All rows share this length.
    pub fn width(&self) -> usize {
        self.sequences[0].len()
    }

    pub fn names(&self) -> Vec<String> {
        self.sequences
            .iter()
            .map(|seq| seq.name().to_string())
            .collect()
    }

    /// Symbols of column `i` across all rows, in row order.
    pub fn column(&self, i: usize) -> Vec<u8> {
        self.sequences.iter().map(|seq| seq.symbols()[i]).collect()
    }
}

use clap::*;
use std::io::Write;

use pacon::libs::alignment::Alignment;
use pacon::libs::distance;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("distance")
        .about("Pairwise identity distances of an alignment")
        .after_help(
            r###"
Computes the identity distance between every pair of aligned sequences:
the proportion of columns at which the two sequences disagree, in [0, 1].

Notes:
* Input: aligned FASTA; all records must have the same length.
* Gap characters are ordinary symbols; a gap against a base is a mismatch.
* Supports both plain text and gzipped (.gz) files.
* Reads from stdin if input file is 'stdin'.
* Output: relaxed PHYLIP distance matrix, suitable for `pacon tree`-style
  consumers and external tools.

Examples:
1. Write the matrix to a file:
   pacon distance tests/aln/example.fa -o matrix.phy

2. Pipe an alignment in:
   cat tests/aln/example.fa | pacon distance stdin

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input FASTA alignment. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let mut writer = pacon::writer(args.get_one::<String>("outfile").unwrap());

    let aln = Alignment::from_fasta(pacon::reader(infile))?;
    let matrix = distance::identity_distance(&aln)?;

    writer.write_all(matrix.to_phylip().as_ref())?;

    Ok(())
}

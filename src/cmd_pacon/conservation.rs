use clap::*;
use std::io::Write;

use pacon::libs::alignment::Alignment;
use pacon::libs::conservation;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("conservation")
        .about("Per-column conservation scores of an alignment")
        .after_help(
            r###"
Scores each alignment column by the frequency of its most common symbol.
A fully conserved column scores 1.0; the minimum possible score is 1/N for
N sequences.

Notes:
* Input: aligned FASTA; all records must have the same length.
* Supports both plain text and gzipped (.gz) files.
* Reads from stdin if input file is 'stdin'.
* Output: tab-separated `position  score`, positions counted from 1.
* When two symbols tie for most common, the tie resolves by byte value,
  so scores never depend on record order.

Examples:
1. Score an alignment:
   pacon conservation tests/aln/example.fa

2. Save the output to a file:
   pacon conservation tests/aln/example.fa -o scores.tsv

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
    let scores = conservation::scores(&aln)?;

    for (i, score) in scores.iter().enumerate() {
        writer.write_fmt(format_args!("{}\t{:.4}\n", i + 1, score))?;
    }

    Ok(())
}

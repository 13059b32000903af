use clap::*;
use std::io::Write;

use pacon::libs::alignment::Alignment;
use pacon::libs::distance;
use pacon::libs::phylo::build;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("tree")
        .about("Construct a phylogenetic tree using UPGMA")
        .after_help(
            r###"
Computes pairwise identity distances of the alignment, then clusters them
with UPGMA (average linkage). The resulting tree is ultrametric: all leaves
are equidistant from the root.

Notes:
* Input: aligned FASTA; all records must have the same length.
* Output: Newick tree with branch lengths.
* `--indent` re-formats the Newick output with one node per line, making
  the nesting structure readable as plain text.
* Ties between equally close clusters resolve by input order, so the
  output is deterministic.

Examples:
1. Build tree from an alignment:
   pacon tree tests/aln/example.fa -o tree.nwk

2. Indented depiction of the structure:
   pacon tree tests/aln/example.fa --indent

3. Indent with visual guides (NOT valid Newick):
   pacon tree tests/aln/example.fa --indent --text ".   "

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
            Arg::new("indent")
                .long("indent")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the tree, one node per line"),
        )
        .arg(
            Arg::new("text")
                .long("text")
                .short('t')
                .num_args(1)
                .default_value("  ")
                .help("Use this text as the indent unit instead of two spaces"),
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

    let text = if args.get_flag("indent") {
        args.get_one::<String>("text").unwrap()
    } else {
        ""
    };

    let aln = Alignment::from_fasta(pacon::reader(infile))?;
    let matrix = distance::identity_distance(&aln)?;
    let tree = build::upgma(&matrix)?;

    writer.write_all((tree.to_newick_with_format(text) + "\n").as_ref())?;

    Ok(())
}

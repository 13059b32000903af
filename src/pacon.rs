extern crate clap;
use clap::*;

mod cmd_pacon;

fn main() -> anyhow::Result<()> {
    let app = Command::new("pacon")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`pacon` - Phylogeny And CONservation toolkit")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_pacon::distance::make_subcommand())
        .subcommand(cmd_pacon::tree::make_subcommand())
        .subcommand(cmd_pacon::conservation::make_subcommand())
        .after_help(
            r###"Subcommands:

* distance     - Pairwise identity distances of an alignment
* tree         - UPGMA tree from an alignment
* conservation - Per-column conservation scores

All subcommands read aligned FASTA (equal-length records) from a file,
stdin or a gzipped file.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("distance", sub_matches)) => cmd_pacon::distance::execute(sub_matches),
        Some(("tree", sub_matches)) => cmd_pacon::tree::execute(sub_matches),
        Some(("conservation", sub_matches)) => cmd_pacon::conservation::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

//! `huffcheck-gen`: regenerate the fixture corpus.
//!
//! Writes every catalog fixture into the fixtures directory (default
//! `tests/`), creating it if needed and overwriting earlier content. Any I/O
//! failure is fatal and exits 1.

use anyhow::Context;
use clap::Parser;

use huffcheck::cli::GenArgs;
use huffcheck::display::set_display_level;
use huffcheck::{displaylevel, generate_corpus};

fn run(args: GenArgs) -> anyhow::Result<()> {
    let config = args.corpus_config();
    displaylevel!(2, "Generating test files in {}/...\n", config.fixtures_dir.display());
    let generated = generate_corpus(&config)
        .with_context(|| format!("corpus generation in {} failed", config.fixtures_dir.display()))?;
    let total: u64 = generated.iter().map(|g| g.spec.byte_length).sum();
    displaylevel!(2, "Done. {} fixtures, {} bytes.\n", generated.len(), total);
    Ok(())
}

fn main() {
    let args = GenArgs::parse();
    set_display_level(args.display_level());

    if let Err(e) = run(args) {
        displaylevel!(1, "huffcheck-gen: {:#}\n", e);
        std::process::exit(1);
    }
}

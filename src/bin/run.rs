//! `huffcheck-run`: run every fixture through the tool under test.
//!
//! Prints one PASS/FAIL block per fixture and a final `Summary: P/T tests
//! passed.` line. Exits 0 iff every fixture passed, 1 otherwise, including
//! when the fixtures directory cannot be read.

use clap::Parser;

use huffcheck::cli::RunArgs;
use huffcheck::display::set_display_level;
use huffcheck::{displaylevel, run_batch};

fn main() {
    let args = RunArgs::parse();
    set_display_level(args.display_level());

    let config = args.harness_config();
    displaylevel!(
        3,
        "*** huffcheck v{} : tool {} ***\n",
        huffcheck::version_string(),
        config.tool.display()
    );

    let exit_code = match run_batch(&config) {
        Ok(summary) => summary.exit_code(),
        Err(e) => {
            displaylevel!(1, "huffcheck-run: {:#}\n", anyhow::Error::from(e));
            1
        }
    };
    std::process::exit(exit_code);
}

//! Command-line surface of the two binaries.
//!
//! | Submodule | Responsibility |
//! |-----------|----------------|
//! | [`args`]  | `clap` argument structs for `huffcheck-gen` and `huffcheck-run`, and their conversion into [`crate::CorpusConfig`] / [`crate::HarnessConfig`]. |
//!
//! Every flag is optional: run with no arguments, each binary uses the
//! documented defaults from [`crate::config`].

pub mod args;

pub use args::{GenArgs, RunArgs};

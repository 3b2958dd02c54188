//! Filesystem helpers shared by the generator and the oracle.
//!
//! - [`file_list`]: fixture enumeration with name-based exclusion.
//! - [`group_thousands`]: `1,048,576`-style integer formatting for reports.

pub mod file_list;

pub use file_list::list_fixtures;

use std::io;
use std::path::Path;

/// Format `n` with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Delete `path` if it exists. A missing file is not an error.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

// Shared fake tools for the oracle tests.
//
// Each tool is a POSIX shell script run as `/bin/sh <script> <input>
// <compressed> <decoded>`. Going through `/bin/sh` means the script never
// needs the executable bit.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use huffcheck::HarnessConfig;
use tempfile::TempDir;

/// Copies input to both artifacts and reports a 1:1 "compression".
pub const ROUND_TRIP: &str = r#"set -e
cp "$1" "$2"
cp "$2" "$3"
n=$(wc -c < "$1" | tr -d ' ')
echo "Original Size: $n bytes"
echo "Compressed Size: $n bytes"
echo "Entropy: 1.0000 bits/symbol"
echo "Time Taken: 0.001000 seconds"
echo "Time Taken: 0.000500 seconds"
"#;

/// Writes an eighth of the input as the compressed artifact and reports it.
pub const SHRINKING: &str = r#"set -e
n=$(wc -c < "$1" | tr -d ' ')
c=$((n / 8))
head -c "$c" "$1" > "$2"
cp "$1" "$3"
echo "Original Size: $n bytes"
echo "Compressed Size: $c bytes"
echo "Entropy: 1.0000 bits/symbol"
echo "Time Taken: 0.002000 seconds"
echo "Time Taken: 0.001000 seconds"
"#;

/// Decodes with one extra trailing byte.
pub const CORRUPTING: &str = r#"set -e
cp "$1" "$2"
cp "$1" "$3"
printf 'X' >> "$3"
echo "Original Size: 1 bytes"
"#;

/// Exits non-zero after complaining on stderr.
pub const FAILING: &str = r#"echo "huff: cannot build tree" >&2
exit 2
"#;

/// Exits 0 but never writes the decoded artifact.
pub const SILENT: &str = r#"cp "$1" "$2"
echo "Original Size: 0 bytes"
"#;

/// Never finishes on its own.
pub const HANGING: &str = "exec sleep 30\n";

/// Fails only for inputs whose name contains `random`.
pub const PICKY: &str = r#"case "$1" in
  *random*) echo "huff: refusing $1" >&2; exit 1 ;;
esac
cp "$1" "$2"
cp "$1" "$3"
"#;

pub struct FakeTool {
    // Keeps the script alive for the duration of the test.
    _dir: TempDir,
    pub script: PathBuf,
}

impl FakeTool {
    pub fn new(body: &str) -> FakeTool {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("huff.sh");
        fs::write(&script, body).unwrap();
        FakeTool { _dir: dir, script }
    }

    /// Point `config` at this tool.
    pub fn install(&self, config: &mut HarnessConfig) {
        config
            .set_tool("/bin/sh")
            .set_tool_args([self.script.clone().into_os_string()]);
    }
}

/// A harness config rooted in `root`: fixtures in `root/tests`, artifacts in
/// `root/tests/outputs`, tool given by `body`.
pub fn harness_in(root: &Path, body: &str) -> (HarnessConfig, FakeTool) {
    let tool = FakeTool::new(body);
    let mut config = HarnessConfig::default();
    config
        .set_fixtures_dir(root.join("tests"))
        .set_outputs_dir(root.join("tests").join("outputs"));
    tool.install(&mut config);
    fs::create_dir_all(&config.fixtures_dir).unwrap();
    (config, tool)
}

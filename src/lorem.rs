// lorem.rs: fixed lorem ipsum paragraph used by the natural-language fixture

use std::io::{self, Write};

/// The paragraph repeated to build `text_lorem.txt`.
pub const LOREM_PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. \
Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. \
Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

/// Total length in bytes of `repeat` back-to-back copies of the paragraph.
pub fn repeated_len(repeat: usize) -> u64 {
    LOREM_PARAGRAPH.len() as u64 * repeat as u64
}

/// Write `repeat` copies of [`LOREM_PARAGRAPH`] with no separator.
///
/// Returns the number of bytes written.
pub fn write_repeated<W: Write + ?Sized>(out: &mut W, repeat: usize) -> io::Result<u64> {
    let paragraph = LOREM_PARAGRAPH.as_bytes();
    for _ in 0..repeat {
        out.write_all(paragraph)?;
    }
    Ok(repeated_len(repeat))
}

// display.rs: process-wide verbosity and console output macros.
//
// Both binaries share one display level so library code (corpus writers,
// the oracle runner) can emit progress without threading a logger through
// every call.
//
// 0 = no output; 1 = errors only; 2 = normal (default); 3 = progress; 4 = verbose

use std::sync::atomic::{AtomicU32, Ordering};

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Adjust the default level by `-v` / `-q` counts, saturating at 0 and 4.
pub fn level_from_flags(verbose: u8, quiet: u8) -> u32 {
    let level = 2i32 + verbose as i32 - quiet as i32;
    level.clamp(0, 4) as u32
}

/// Print to stdout. Per-fixture results are data, not diagnostics.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

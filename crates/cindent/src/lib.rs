#![deny(clippy::unwrap_used)]

// Indenter design
//
// Pipeline (all per call, nothing survives between calls):
// 1) Cursor: the caller hands us a `LineCursor` parked on the bottom line.
// 2) Linizer: walks backward one line at a time, cleaning each line (literals, inline
//    comments, labels, `//` tails masked; block comments and `#` directives blanked) and
//    keeping a running brace depth.
// 3) Classify: decide whether the bottom line sits in a C comment, continues an
//    unfinished statement, or starts a new one.
// 4) Calculate: one of three column strategies, then the `}` / case-label corrections.
//
// Every backward scan is capped (`SMALL_ROOF` / `BIG_ROOF`), so malformed input degrades to
// a depth-based guess instead of looping.

mod calculate;
mod classify;
pub mod column;
mod config;
mod cursor;
mod indenter;
mod linizer;
mod normalize;
pub mod patterns;

pub use config::{ConfigError, IndentConfig};
pub use cursor::{LineCursor, SliceCursor};
pub use indenter::{Indenter, is_electric_character};
pub use normalize::clean_line;

/// Cap on the lines read by the ordinary backward scans.
pub const SMALL_ROOF: usize = 40;
/// Cap on the raw lines inspected when looking for an open C comment above the bottom line.
pub const BIG_ROOF: usize = 400;

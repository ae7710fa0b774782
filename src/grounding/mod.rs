//! Grounding extracted text to exact offsets.
//!
//! Every citation context and every flagged or cited response fragment is
//! tied to a half-open span in the string it came from.
//!
//! # Design Principles
//!
//! - **Verbatim or nothing**: a fragment that does not occur exactly in its
//!   target aborts the parse rather than producing a guessed span.
//! - **First occurrence**: repeated fragments resolve to the earliest match,
//!   with a warning.
//! - **Checkable**: `validate_spans` recomputes every slice from its offsets.
//!
//! # Example
//!
//! ```
//! use citemark::grounding::{resolve_span, SpanTarget};
//!
//! let span = resolve_span("Dog info", "info", SpanTarget::DocumentContext, "1").unwrap();
//! assert_eq!((span.begin, span.end), (4, 8));
//! ```

pub mod consistency;
pub mod spans;

pub use consistency::validate_spans;
pub use spans::{
    compute_hash, find_exact_matches, find_fragment, offset_to_line_col, resolve_span, LineCol,
    MatchResult, MatchStatus, Span, SpanTarget,
};

//! Markup handling for raw model output.
//!
//! - `tags`: Scanning and stripping inline `<co>N</co>` citation markers
//! - `blocks`: Splitting output into response, citations and hallucinations
//! - `structure`: Advisory checks on marker nesting and counts

pub mod blocks;
pub mod structure;
pub mod tags;

pub use blocks::{split_blocks, Blocks, CITATIONS_HEADER, HALLUCINATIONS_HEADER};
pub use structure::{check_structure, StructuralWarning};
pub use tags::{find_markers, marker_at, strip_markers, Marker, CLOSE_TAG, OPEN_TAG};

//! Source file parsing (swc, TypeScript/TSX syntax).

pub mod jsx;

pub use jsx::{ParsedSource, parse_source};

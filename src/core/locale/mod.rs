//! Locale dictionaries: the nested tree and the stores that persist it.

pub mod store;
pub mod tree;

pub use store::{FsLocaleStore, LocaleStore, MemoryLocaleStore, load_tree, save_tree};
pub use tree::{LocaleTree, is_ignored, is_interpolated, last_segment};

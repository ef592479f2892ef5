/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Debounced scheduling of searches (debounce.rs)
/// - Identifiers, fetched artworks and the view index (gallery.rs)

pub mod data;
pub mod debounce;
pub mod gallery;

/// Museum collection API module
///
/// This module handles:
/// - Talking HTTP to the Met collection API (client.rs)
/// - Resolving a query into object IDs and fetching detail batches (fetch.rs)

pub mod client;
pub mod fetch;

pub use client::{MetClient, MuseumApi, MuseumError};
pub use fetch::{fetch_artworks, search_object_ids};

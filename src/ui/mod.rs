/// UI helpers
///
/// - `eyes.rs` - keyboard signal for closing and opening the eyes
/// - `picture.rs` - turning downloaded thumbnails into image handles

pub mod eyes;
pub mod picture;

use image::imageops::FilterType;
use iced::widget::image::Handle;
use std::sync::Arc;
use tracing::debug;

use crate::museum::{MuseumApi, MuseumError};

/// A thumbnail ready for display
#[derive(Debug, Clone)]
pub struct Picture {
    /// Source URL, used to tell whether the picture is still wanted
    pub url: String,
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Download a thumbnail and prepare it for display
pub async fn load_picture(
    api: Arc<dyn MuseumApi>,
    url: String,
    max_width: u32,
) -> Result<Picture, MuseumError> {
    let bytes = api.image_bytes(&url).await?;

    // Decoding and resizing are CPU-bound
    let (width, height, rgba) =
        tokio::task::spawn_blocking(move || prepare_rgba(&bytes, max_width)).await??;

    debug!("📸 Prepared picture {}x{}: {}", width, height, url);
    Ok(Picture {
        url,
        handle: Handle::from_rgba(width, height, rgba),
        width,
        height,
    })
}

/// Decode encoded image bytes into RGBA pixels, downscaling anything wider
/// than `max_width` while keeping the aspect ratio.
pub fn prepare_rgba(bytes: &[u8], max_width: u32) -> Result<(u32, u32, Vec<u8>), image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > max_width {
        img.resize(max_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok((rgba.width(), rgba.height(), rgba.into_raw()))
}

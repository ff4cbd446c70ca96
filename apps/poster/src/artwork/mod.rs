//! Artwork pipeline — cover art and the scannable album code.
//!
//! The cover is downloaded and resized to a fixed square block. The scannable
//! code comes from Spotify's remote renderer in the poster's background color;
//! any failure there falls back to a locally generated QR code so the poster
//! always carries a working link.

use bytes::Bytes;
use image::{imageops, RgbaImage};
use qrcode::{Color, QrCode};
use tracing::{debug, warn};

use crate::catalog::extract_album_id;
use crate::errors::PosterError;

/// Cover art block edge, in both pixels and page points.
pub const COVER_SIZE_PX: u32 = 400;
/// Fixed width of the remote-rendered scannable code on the page.
pub const SCANNABLE_WIDTH_PX: u32 = 250;
/// Fallback QR code edge.
pub const QR_FALLBACK_SIZE_PX: u32 = 100;

/// Background color shared by the page and the scannable code request.
pub const BACKGROUND_HEX: &str = "F8F8F5";

/// The scannable code image plus its dimensions in page points (1pt = 1px
/// for downloaded artwork, matching the cover block).
#[derive(Debug, Clone)]
pub struct ScannableCode {
    pub image: RgbaImage,
    pub width: f32,
    pub height: f32,
}

/// Downloads the cover image and resizes it to the fixed cover block.
pub async fn fetch_cover(client: &reqwest::Client, url: &str) -> Result<RgbaImage, PosterError> {
    debug!(url, "downloading cover art");
    let bytes: Bytes = client.get(url).send().await?.error_for_status()?.bytes().await?;
    let decoded = image::load_from_memory(&bytes)?;
    let resized = imageops::resize(
        &decoded.to_rgba8(),
        COVER_SIZE_PX,
        COVER_SIZE_PX,
        imageops::FilterType::Lanczos3,
    );
    Ok(resized)
}

/// Fetches the remote-rendered scannable code for the album, falling back to
/// a local QR code on any failure.
pub async fn fetch_scannable(
    client: &reqwest::Client,
    album_url: &str,
) -> Result<ScannableCode, PosterError> {
    match fetch_remote_code(client, album_url).await {
        Ok(code) => Ok(code),
        Err(e) => {
            warn!("scannable code fetch failed ({e}), using QR fallback");
            fallback_qr(album_url)
        }
    }
}

async fn fetch_remote_code(
    client: &reqwest::Client,
    album_url: &str,
) -> Result<ScannableCode, PosterError> {
    let album_id = extract_album_id(album_url)?;
    let code_url = format!(
        "https://scannables.scdn.co/uri/plain/png/{BACKGROUND_HEX}/black/640/spotify:album:{album_id}"
    );
    debug!(code_url, "fetching scannable code");

    let bytes = client
        .get(&code_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let decoded = image::load_from_memory(&bytes)?.to_rgba8();

    // Scale to the fixed poster width, keeping the source aspect ratio.
    let new_width = SCANNABLE_WIDTH_PX;
    let new_height =
        ((new_width as f32 / decoded.width() as f32) * decoded.height() as f32) as u32;
    let resized = imageops::resize(&decoded, new_width, new_height, imageops::FilterType::Lanczos3);

    Ok(ScannableCode {
        width: resized.width() as f32,
        height: resized.height() as f32,
        image: resized,
    })
}

/// Builds a local QR code for the album URL at the fallback size.
pub fn fallback_qr(album_url: &str) -> Result<ScannableCode, PosterError> {
    let code = QrCode::new(album_url.as_bytes())
        .map_err(|e| PosterError::Internal(anyhow::anyhow!("QR encode failed: {e}")))?;

    // Render module-per-pixel, then scale up to the fallback size.
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let mut img = RgbaImage::from_pixel(modules, modules, image::Rgba([255, 255, 255, 255]));
    for (i, color) in colors.iter().enumerate() {
        if *color == Color::Dark {
            let x = i as u32 % modules;
            let y = i as u32 / modules;
            img.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
        }
    }

    let scaled = imageops::resize(
        &img,
        QR_FALLBACK_SIZE_PX,
        QR_FALLBACK_SIZE_PX,
        imageops::FilterType::Nearest,
    );
    Ok(ScannableCode {
        width: scaled.width() as f32,
        height: scaled.height() as f32,
        image: scaled,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUM_URL: &str = "https://open.spotify.com/album/0ETFjACtuP2ADo6LFhL6HN";

    #[test]
    fn test_fallback_qr_has_fallback_dimensions() {
        let code = fallback_qr(ALBUM_URL).unwrap();
        assert_eq!(code.image.width(), QR_FALLBACK_SIZE_PX);
        assert_eq!(code.image.height(), QR_FALLBACK_SIZE_PX);
        assert_eq!(code.width, QR_FALLBACK_SIZE_PX as f32);
        assert_eq!(code.height, QR_FALLBACK_SIZE_PX as f32);
    }

    #[test]
    fn test_fallback_qr_contains_dark_and_light_pixels() {
        let code = fallback_qr(ALBUM_URL).unwrap();
        let mut dark = 0usize;
        let mut light = 0usize;
        for pixel in code.image.pixels() {
            if pixel.0[0] == 0 {
                dark += 1;
            } else {
                light += 1;
            }
        }
        assert!(dark > 0, "QR code must contain dark modules");
        assert!(light > 0, "QR code must contain light modules");
    }

    #[test]
    fn test_fallback_qr_is_deterministic() {
        let a = fallback_qr(ALBUM_URL).unwrap();
        let b = fallback_qr(ALBUM_URL).unwrap();
        assert_eq!(a.image.as_raw(), b.image.as_raw());
    }
}

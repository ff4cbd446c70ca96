mod artwork;
mod catalog;
mod config;
mod errors;
mod layout;
mod render;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::artwork::{fetch_cover, fetch_scannable};
use crate::catalog::SpotifyClient;
use crate::config::Config;
use crate::layout::geometry::{BORDER_WIDTH, PAGE_WIDTH, RESERVED_BUFFER};
use crate::layout::{build_poster_plan, HelveticaMeasurer, PosterContent, PosterGeometry, Rect};
use crate::render::fonts::load_font_set;
use crate::render::render_poster;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting poster v{}", env!("CARGO_PKG_VERSION"));

    let album_url = match std::env::args().nth(1) {
        Some(url) => url,
        None => bail!("usage: poster <spotify album URL>"),
    };

    let spotify = SpotifyClient::new(
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
    )?;
    let album = spotify.album(&album_url).await?;
    info!(
        album = %album.name,
        artist = %album.artist,
        tracks = album.tracks.len(),
        "album details fetched"
    );

    let cover = match &album.cover_url {
        Some(url) => match fetch_cover(spotify.http(), url).await {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("cover download failed, leaving the cover block empty: {e}");
                None
            }
        },
        None => {
            warn!("album has no cover image");
            None
        }
    };

    let code = fetch_scannable(spotify.http(), &album.url).await?;

    // The scannable code sits inside the bottom-right corner of the border,
    // with the standard clearance on each side.
    let geometry = PosterGeometry::a4(Rect {
        x: PAGE_WIDTH - BORDER_WIDTH - RESERVED_BUFFER - code.width,
        y: BORDER_WIDTH + RESERVED_BUFFER,
        w: code.width,
        h: code.height,
    });

    let content = PosterContent {
        title: album.name.to_uppercase(),
        subtitle: album.artist.to_uppercase(),
        items: album.tracks.iter().map(|t| t.to_uppercase()).collect(),
    };

    let fonts = load_font_set(&config)?;

    // Layout and rasterization are CPU-bound; keep them off the async runtime.
    let (plan, img) = tokio::task::spawn_blocking(move || {
        let measurer = HelveticaMeasurer;
        let plan = build_poster_plan(&content, &geometry, &measurer)?;
        let img = render_poster(&plan, &geometry, cover.as_ref(), &code, &fonts)?;
        Ok::<_, crate::errors::PosterError>((plan, img))
    })
    .await
    .context("layout task panicked")??;

    if plan.overflowed {
        warn!(
            attempts = plan.attempts,
            omitted = plan.omitted_items,
            "content did not fully fit at minimum font sizes"
        );
    }

    let filename = output_filename(&album.artist, &album.name);
    img.save(&filename)
        .with_context(|| format!("failed to write {filename}"))?;
    info!(%filename, "poster saved");

    Ok(())
}

/// Output file name in the same uppercased form the poster itself shows.
fn output_filename(artist: &str, album: &str) -> String {
    format!(
        "{} - {}.png",
        safe_filename(&artist.to_uppercase()),
        safe_filename(&album.to_uppercase())
    )
}

/// Replaces characters that are invalid in common filesystems.
fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename_passes_clean_names_through() {
        assert_eq!(safe_filename("Abbey Road"), "Abbey Road");
    }

    #[test]
    fn test_safe_filename_replaces_reserved_characters() {
        assert_eq!(safe_filename("AC/DC: Live?"), "AC_DC_ Live_");
        assert_eq!(safe_filename("a\\b*c\"d<e>f|g"), "a_b_c_d_e_f_g");
    }

    #[test]
    fn test_output_filename_is_uppercased() {
        assert_eq!(
            output_filename("The Beatles", "Abbey Road"),
            "THE BEATLES - ABBEY ROAD.png"
        );
    }
}

//! Chordline — renders line-oriented chord notation into mono PCM audio.
//!
//! Each line of a score is a track. Lines are lexed and interpreted into
//! chord events ([`notation`]), each chord is synthesized and shaped
//! ([`instrument`]), and tracks are mixed and normalized ([`audio`]).

pub mod audio;
pub mod config;
pub mod error;
pub mod event;
pub mod instrument;
pub mod notation;

pub use audio::{Rendered, Renderer};
pub use config::RenderConfig;
pub use error::Error;
pub use event::Song;
pub use notation::{Notation, NotationError};

use std::path::Path;

/// Read a score file, render it, and write the WAV.
///
/// `inspect` sees the interpreted song before it is rendered. Nothing is
/// written unless the whole score interprets cleanly.
pub fn render_file<F>(
    source: &Path,
    output: &Path,
    config: &RenderConfig,
    inspect: F,
) -> Result<Rendered, Error>
where
    F: FnOnce(&Song),
{
    let text = std::fs::read_to_string(source)?;
    log::info!("read {} ({} bytes)", source.display(), text.len());

    let song = Notation::parse(&source.to_string_lossy(), &text, &config.notation_options())?;
    log::info!(
        "{} tracks, {} chord events, tempo {} BPM",
        song.tracks.len(),
        song.event_count(),
        song.tempo_bpm
    );
    if song.is_empty() {
        log::warn!("{} has no chord events, output is silent", source.display());
    }
    inspect(&song);

    let rendered = config.renderer().render(&song);
    audio::wav::write_wav(output, &rendered, config.sample_format)?;
    Ok(rendered)
}

//! WAV output — mono PCM via `hound`.

use std::io::{Seek, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Rendered;

/// Sample encoding of the written file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// 32-bit IEEE float.
    #[default]
    Float32,
    /// 16-bit signed integer, clipped to ±1.
    Int16,
}

impl SampleFormat {
    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            SampleFormat::Float32 => (32, hound::SampleFormat::Float),
            SampleFormat::Int16 => (16, hound::SampleFormat::Int),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Write `rendered` to any seekable writer.
pub fn write_wav_to<W: Write + Seek>(
    writer: W,
    rendered: &Rendered,
    format: SampleFormat,
) -> Result<(), hound::Error> {
    let mut wav = hound::WavWriter::new(writer, format.spec(rendered.sample_rate))?;
    match format {
        SampleFormat::Float32 => {
            for &sample in &rendered.samples {
                wav.write_sample(sample as f32)?;
            }
        }
        SampleFormat::Int16 => {
            let max = i16::MAX as f64;
            for &sample in &rendered.samples {
                wav.write_sample((sample.clamp(-1.0, 1.0) * max).round() as i16)?;
            }
        }
    }
    wav.finalize()
}

/// Write `rendered` to a file at `path`, replacing it if it exists.
pub fn write_wav(path: &Path, rendered: &Rendered, format: SampleFormat) -> Result<(), hound::Error> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_wav_to(file, rendered, format)?;
    log::info!(
        "wrote {} frames ({:.2}s) to {}",
        rendered.samples.len(),
        rendered.duration_secs(),
        path.display()
    );
    Ok(())
}

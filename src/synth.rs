//! Synthesis boundary
//!
//! The pipeline produces chunks; a `Synthesizer` turns each chunk into raw
//! audio. The backend is behind a trait so tests and alternative engines can
//! plug in. A chunk whose synthesis fails is replaced by one second of
//! silence instead of aborting the utterance.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sample rate used for fallback silence, matching the voice models.
pub const FALLBACK_SAMPLE_RATE: u32 = 22050;

/// Knobs forwarded to the voice model for one synthesis call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    pub speaker_id: u32,
    /// Phoneme duration multiplier; higher is slower speech.
    pub length_scale: f32,
    pub noise_scale: f32,
    pub noise_w_scale: f32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            speaker_id: 0,
            length_scale: 1.0,
            noise_scale: 0.667,
            noise_w_scale: 0.8,
        }
    }
}

/// Mono PCM samples in the f32 range [-1, 1].
#[derive(Debug, Clone)]
pub struct RawAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl RawAudio {
    /// One second of silence at the fallback rate.
    pub fn silence() -> Self {
        Self {
            samples: vec![0.0; FALLBACK_SAMPLE_RATE as usize],
            sample_rate: FALLBACK_SAMPLE_RATE,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// A voice backend. Implementations are expected to be deterministic for a
/// fixed seed but nothing here relies on that.
pub trait Synthesizer {
    fn synthesize(&self, text: &str, options: &SynthesisOptions) -> Result<RawAudio>;
}

/// One synthesized chunk, keeping the text it was rendered from.
#[derive(Debug, Clone)]
pub struct ChunkAudio {
    pub text: String,
    pub audio: RawAudio,
}

/// Synthesize chunks in order. A failing chunk logs a warning and yields
/// silence so playback timing survives a flaky backend.
pub fn synthesize_chunks(
    synthesizer: &dyn Synthesizer,
    chunks: &[String],
    options: &SynthesisOptions,
) -> Vec<ChunkAudio> {
    chunks
        .iter()
        .map(|chunk| {
            let audio = match synthesizer.synthesize(chunk, options) {
                Ok(audio) => audio,
                Err(err) => {
                    warn!(chunk = %chunk, %err, "synthesis failed, substituting silence");
                    RawAudio::silence()
                }
            };
            ChunkAudio {
                text: chunk.clone(),
                audio,
            }
        })
        .collect()
}

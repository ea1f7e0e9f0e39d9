use serde::{Deserialize, Serialize};

/// Length of the canonical RIFF/WAVE header that precedes the PCM payload.
const WAV_HEADER_LEN: usize = 44;

/// Bit depth of a signed little-endian PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitDepth {
    Bits8,
    Bits16,
    Bits24,
    Bits32,
}

impl BitDepth {
    /// Bytes per sample frame.
    pub fn frame_bytes(&self) -> usize {
        match self {
            BitDepth::Bits8 => 1,
            BitDepth::Bits16 => 2,
            BitDepth::Bits24 => 3,
            BitDepth::Bits32 => 4,
        }
    }

    /// Maximum positive amplitude representable at this depth.
    fn max_amplitude(&self) -> f32 {
        match self {
            BitDepth::Bits8 => i8::MAX as f32,
            BitDepth::Bits16 => i16::MAX as f32,
            BitDepth::Bits24 => ((1 << 23) - 1) as f32,
            BitDepth::Bits32 => i32::MAX as f32,
        }
    }
}

/// A raw WAV byte stream together with its declared bit depth.
///
/// The buffer is read-only to the decoder; whisper expects mono 16kHz input
/// but this type makes no attempt to verify the header, it only skips it.
#[derive(Debug, Clone)]
pub struct PcmBuffer {
    data: Vec<u8>,
    depth: BitDepth,
}

impl PcmBuffer {
    pub fn new(data: Vec<u8>, depth: BitDepth) -> Self {
        Self { data, depth }
    }

    /// Raw bytes, header included.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Normalize the PCM payload into f32 samples in `[-1.0, 1.0]`.
    ///
    /// Skips the 44-byte WAV header, then reads the remainder in exact
    /// frames of `frame_bytes()`; a trailing partial frame is dropped. Each
    /// frame is reconstructed as a little-endian signed integer and divided
    /// by the maximum positive amplitude for the depth, so the most negative
    /// value lands slightly below -1.0 and is clamped. A buffer shorter than
    /// the header yields an empty vec. This function never fails.
    pub fn normalize(&self) -> Vec<f32> {
        let Some(payload) = self.data.get(WAV_HEADER_LEN..) else {
            return Vec::new();
        };

        let max = self.depth.max_amplitude();
        payload
            .chunks_exact(self.depth.frame_bytes())
            .map(|frame| {
                let value = match self.depth {
                    BitDepth::Bits8 => frame[0] as i8 as i32,
                    BitDepth::Bits16 => i16::from_le_bytes([frame[0], frame[1]]) as i32,
                    BitDepth::Bits24 => sign_extend_24(frame[0], frame[1], frame[2]),
                    BitDepth::Bits32 => i32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]),
                };
                (value as f32 / max).clamp(-1.0, 1.0)
            })
            .collect()
    }
}

/// Reconstruct a 24-bit little-endian sample, extending the sign bit of the
/// most significant byte into the upper byte of the i32.
fn sign_extend_24(b0: u8, b1: u8, b2: u8) -> i32 {
    let mut value = b0 as i32 | (b1 as i32) << 8 | (b2 as i32) << 16;
    if b2 & 0x80 != 0 {
        value |= -1i32 << 24;
    }
    value
}

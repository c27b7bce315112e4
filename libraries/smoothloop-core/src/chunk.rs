//! RIFF `smpl` chunk carrying the loop points
//!
//! The chunk describes one forward loop between two frame offsets. Apart
//! from those two fields every byte is fixed:
//!
//! | Offset | Field                    | Value            |
//! |--------|--------------------------|------------------|
//! | 0      | chunk id                 | `smpl`           |
//! | 4      | chunk body size          | 60               |
//! | 8..36  | sampler header fields    | 0                |
//! | 36     | number of sample loops   | 1                |
//! | 40     | sampler data             | 0x18             |
//! | 44     | cue point id             | 0                |
//! | 48     | loop type                | 0 (forward)      |
//! | 52     | loop start               | frame offset     |
//! | 56     | loop end                 | frame offset     |
//! | 60     | fraction                 | 0                |
//! | 64     | play count               | 0 (infinite)     |

use crate::error::{LoopError, Result};
use crate::planner::LoopPlan;

/// Total length of an encoded loop chunk, header included
pub const LOOP_CHUNK_LEN: usize = 68;

/// RIFF id of the loop chunk
pub const LOOP_CHUNK_ID: [u8; 4] = *b"smpl";

const LOOP_START_OFFSET: usize = 52;
const LOOP_STOP_OFFSET: usize = 56;

const LOOP_CHUNK_TEMPLATE: [u8; LOOP_CHUNK_LEN] = [
    b's', b'm', b'p', b'l', 0x3C, 0x00, 0x00, 0x00, // id, body size
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // manufacturer, product
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sample period, MIDI unity note
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // MIDI pitch fraction, SMPTE format
    0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // SMPTE offset, sample loops
    0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sampler data, cue point id
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // loop type, loop start
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // loop end, fraction
    0x00, 0x00, 0x00, 0x00, // play count
];

/// Loop points of a sample, as stored in the `smpl` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopChunk {
    /// First frame of the loop
    pub loop_start: u32,
    /// End frame of the loop
    pub loop_stop: u32,
}

impl LoopChunk {
    /// Loop points of a plan
    ///
    /// # Errors
    /// Returns `LoopOffsetOverflow` if an offset doesn't fit in 32 bits
    pub fn from_plan(plan: &LoopPlan) -> Result<Self> {
        Ok(Self {
            loop_start: to_chunk_field(plan.loop_start())?,
            loop_stop: to_chunk_field(plan.loop_stop())?,
        })
    }

    /// Encode into the fixed chunk template
    pub fn encode(&self) -> [u8; LOOP_CHUNK_LEN] {
        let mut chunk = LOOP_CHUNK_TEMPLATE;
        chunk[LOOP_START_OFFSET..LOOP_START_OFFSET + 4].copy_from_slice(&self.loop_start.to_le_bytes());
        chunk[LOOP_STOP_OFFSET..LOOP_STOP_OFFSET + 4].copy_from_slice(&self.loop_stop.to_le_bytes());
        chunk
    }

    /// Read the loop points back from an encoded chunk
    ///
    /// Only the chunk id, the size and the two loop fields are checked.
    ///
    /// # Errors
    /// Returns `InvalidChunk` for a wrong length or chunk id
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != LOOP_CHUNK_LEN {
            return Err(LoopError::InvalidChunk(format!(
                "expected {} bytes, got {}",
                LOOP_CHUNK_LEN,
                bytes.len()
            )));
        }
        if bytes[0..4] != LOOP_CHUNK_ID {
            return Err(LoopError::InvalidChunk(format!(
                "unexpected chunk id {:?}",
                String::from_utf8_lossy(&bytes[0..4])
            )));
        }
        if bytes[4..8] != LOOP_CHUNK_TEMPLATE[4..8] {
            return Err(LoopError::InvalidChunk("unexpected chunk size".to_string()));
        }

        Ok(Self {
            loop_start: read_u32_le(bytes, LOOP_START_OFFSET),
            loop_stop: read_u32_le(bytes, LOOP_STOP_OFFSET),
        })
    }
}

/// Encode the loop points of a plan as a `smpl` chunk
///
/// # Errors
/// Returns `LoopOffsetOverflow` if an offset doesn't fit in 32 bits
pub fn encode(plan: &LoopPlan) -> Result<[u8; LOOP_CHUNK_LEN]> {
    LoopChunk::from_plan(plan).map(|chunk| chunk.encode())
}

fn to_chunk_field(frame: usize) -> Result<u32> {
    u32::try_from(frame).map_err(|_| LoopError::LoopOffsetOverflow(frame))
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

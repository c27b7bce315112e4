//! RIFF container helpers
//!
//! Extra chunks are appended after the audio data; the RIFF size field in
//! the file header is rewritten so readers that honour it still see them.

use crate::error::{Result, WavError};
use smoothloop_core::{LoopChunk, LOOP_CHUNK_ID};
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

const RIFF_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Append a complete chunk (header included) to a RIFF/WAVE file
///
/// # Errors
/// Returns `Malformed` if the file isn't RIFF/WAVE or would grow past 4 GiB
pub fn append_chunk<P: AsRef<Path>>(path: P, chunk: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;

    let mut header = [0u8; RIFF_HEADER_LEN];
    file.read_exact(&mut header)?;
    check_riff_header(&header)?;

    let mut len = file.seek(SeekFrom::End(0))?;
    // Chunks start on even offsets
    if len % 2 == 1 {
        file.write_all(&[0])?;
        len += 1;
    }
    file.write_all(chunk)?;
    len += chunk.len() as u64;

    let riff_size = u32::try_from(len - CHUNK_HEADER_LEN as u64)
        .map_err(|_| WavError::Malformed("file exceeds the 4 GiB RIFF limit".to_string()))?;
    file.seek(SeekFrom::Start(4))?;
    file.write_all(&riff_size.to_le_bytes())?;
    file.flush()?;
    Ok(())
}

/// Find a chunk by id in raw RIFF/WAVE bytes
///
/// Returns the complete chunk, header included.
///
/// # Errors
/// Returns `Malformed` if the bytes aren't RIFF/WAVE or a chunk runs past the end
pub fn find_chunk<'a>(bytes: &'a [u8], id: &[u8; 4]) -> Result<Option<&'a [u8]>> {
    if bytes.len() < RIFF_HEADER_LEN {
        return Err(WavError::Malformed("file shorter than a RIFF header".to_string()));
    }
    check_riff_header(&bytes[..RIFF_HEADER_LEN])?;

    let mut pos = RIFF_HEADER_LEN;
    while pos + CHUNK_HEADER_LEN <= bytes.len() {
        let chunk_id = &bytes[pos..pos + 4];
        let size = u32::from_le_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]) as usize;
        let end = pos + CHUNK_HEADER_LEN + size;
        if end > bytes.len() {
            return Err(WavError::Malformed(format!(
                "chunk {:?} runs past the end of the file",
                String::from_utf8_lossy(chunk_id)
            )));
        }
        if chunk_id == id {
            return Ok(Some(&bytes[pos..end]));
        }
        // Word-aligned chunks
        pos = end + size % 2;
    }
    Ok(None)
}

/// Read the loop points stored in a WAV file, if any
///
/// # Errors
/// Returns an error if the file can't be read, isn't RIFF/WAVE, or holds a
/// `smpl` chunk that can't be parsed
pub fn read_loop_chunk<P: AsRef<Path>>(path: P) -> Result<Option<LoopChunk>> {
    let bytes = fs::read(path.as_ref())?;
    match find_chunk(&bytes, &LOOP_CHUNK_ID)? {
        Some(chunk) => Ok(Some(LoopChunk::parse(chunk)?)),
        None => Ok(None),
    }
}

fn check_riff_header(header: &[u8]) -> Result<()> {
    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return Err(WavError::Malformed("missing RIFF/WAVE header".to_string()));
    }
    Ok(())
}

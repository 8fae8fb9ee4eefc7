// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index snapshots on disk.
//!
//! ```text
//! ┌───────┬─────────┬──────────────────────────────┬───────────────┐
//! │ SCQA  │ version │ brotli(JSON of CorpusIndex)  │ crc32 │ AQCS  │
//! │ 4 B   │ 1 B     │ variable                     │ 4 B LE│ 4 B   │
//! └───────┴─────────┴──────────────────────────────┴───────────────┘
//! ```
//!
//! The CRC covers everything before the footer. Opening checks size, both
//! magics, version and checksum before anything is decompressed, so a
//! truncated or half-written file is rejected up front.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crc32fast::Hasher as Crc32Hasher;

use super::CorpusIndex;
use crate::config::{
    BROTLI_LG_WINDOW, BROTLI_QUALITY, INDEX_FOOTER_MAGIC, INDEX_MAGIC, INDEX_VERSION,
    MAX_INDEX_FILE_SIZE,
};
use crate::error::{Error, Result};

const HEADER_SIZE: usize = 5;
const FOOTER_SIZE: usize = 8;

fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Serialize an index to bytes.
pub fn encode_index(index: &CorpusIndex) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE);
    bytes.extend_from_slice(&INDEX_MAGIC);
    bytes.push(INDEX_VERSION);

    {
        let mut encoder =
            brotli::CompressorWriter::new(&mut bytes, 4096, BROTLI_QUALITY, BROTLI_LG_WINDOW);
        serde_json::to_writer(&mut encoder, index)
            .map_err(|e| Error::CorruptIndex(format!("cannot serialize index: {}", e)))?;
        encoder
            .flush()
            .map_err(|e| Error::CorruptIndex(format!("cannot compress index: {}", e)))?;
    }

    let crc = compute_crc32(&bytes);
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&INDEX_FOOTER_MAGIC);
    Ok(bytes)
}

/// Validate and deserialize index bytes.
pub fn decode_index(bytes: &[u8]) -> Result<CorpusIndex> {
    if bytes.len() as u64 > MAX_INDEX_FILE_SIZE {
        return Err(Error::CorruptIndex(format!(
            "file is {} bytes, limit is {}",
            bytes.len(),
            MAX_INDEX_FILE_SIZE
        )));
    }
    if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
        return Err(Error::CorruptIndex("file too short".into()));
    }
    if bytes[..4] != INDEX_MAGIC {
        return Err(Error::CorruptIndex(format!(
            "invalid magic: expected SCQA, got {:?}",
            &bytes[..4]
        )));
    }
    if bytes[4] != INDEX_VERSION {
        return Err(Error::CorruptIndex(format!(
            "unsupported version {} (expected {})",
            bytes[4], INDEX_VERSION
        )));
    }

    let footer_start = bytes.len() - FOOTER_SIZE;
    if bytes[footer_start + 4..] != INDEX_FOOTER_MAGIC {
        return Err(Error::CorruptIndex("invalid footer magic".into()));
    }
    let stored = u32::from_le_bytes([
        bytes[footer_start],
        bytes[footer_start + 1],
        bytes[footer_start + 2],
        bytes[footer_start + 3],
    ]);
    let actual = compute_crc32(&bytes[..footer_start]);
    if stored != actual {
        return Err(Error::CorruptIndex(format!(
            "checksum mismatch: stored {:08x}, computed {:08x}",
            stored, actual
        )));
    }

    let mut json = Vec::new();
    brotli::Decompressor::new(&bytes[HEADER_SIZE..footer_start], 4096)
        .read_to_end(&mut json)
        .map_err(|e| Error::CorruptIndex(format!("cannot decompress: {}", e)))?;
    let index: CorpusIndex = serde_json::from_slice(&json)
        .map_err(|e| Error::CorruptIndex(format!("cannot decode snapshot: {}", e)))?;

    if !index.is_well_formed() {
        return Err(Error::CorruptIndex("posting lists are inconsistent".into()));
    }
    Ok(index)
}

/// Write an index file. Returns the number of bytes written.
pub fn write_index(index: &CorpusIndex, path: &Path) -> Result<u64> {
    let bytes = encode_index(index)?;
    fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), docs = index.len(), "index written");
    Ok(bytes.len() as u64)
}

/// Open an index file read-only.
pub fn open_index(path: &Path) -> Result<CorpusIndex> {
    let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
    if size > MAX_INDEX_FILE_SIZE {
        return Err(Error::CorruptIndex(format!(
            "file is {} bytes, limit is {}",
            size, MAX_INDEX_FILE_SIZE
        )));
    }
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let index = decode_index(&bytes)?;
    tracing::info!(path = %path.display(), docs = index.len(), "index opened");
    Ok(index)
}

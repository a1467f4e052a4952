//! The 36-byte control header carried in front of every downlinked file.
//!
//! # Layout (big-endian)
//!
//! | Offset | Size | Field           |
//! |--------|------|-----------------|
//! | 0      | 2    | `packet_number` |
//! | 2      | 2    | `payload_size`  |
//! | 4      | 32   | `payload_hash`  |
//!
//! `payload_hash` is the MD5 of the payload as 32 lowercase hex characters,
//! stored as raw ASCII. It is never decoded back to binary.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{self, Write};
use thiserror::Error;

use crate::digest::md5_hex_bytes;

/// Size of the control header in bytes.
pub const HEADER_SIZE: usize = 36;
/// Length of the hex-encoded MD5 field.
pub const HASH_LEN: usize = 32;
/// Radio link transfer unit. Not used when stripping whole files.
pub const CHUNK_SIZE: usize = 32;
/// Link-layer packet size. Not used when stripping whole files.
pub const PACKET_SIZE: usize = 228;
/// Only first-packet headers are accepted.
pub const FIRST_PACKET: u16 = 0;
/// Largest payload the 16-bit size field can describe.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Input too short for a control header: {len} bytes (need {HEADER_SIZE})")]
    Truncated { len: usize },
    #[error("Payload of {len} bytes exceeds the {MAX_PAYLOAD_SIZE}-byte limit of the size field")]
    PayloadTooLarge { len: usize },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlHeader {
    pub packet_number: u16,
    pub payload_size:  u16,
    pub payload_hash:  [u8; HASH_LEN],
}

impl ControlHeader {
    /// Build the first-packet header describing `payload`.
    pub fn for_payload(payload: &[u8]) -> Result<Self, HeaderError> {
        let payload_size = u16::try_from(payload.len())
            .map_err(|_| HeaderError::PayloadTooLarge { len: payload.len() })?;
        Ok(Self {
            packet_number: FIRST_PACKET,
            payload_size,
            payload_hash:  md5_hex_bytes(payload),
        })
    }

    /// Decode a complete header block.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut payload_hash = [0u8; HASH_LEN];
        payload_hash.copy_from_slice(&bytes[4..]);
        Self {
            packet_number: BigEndian::read_u16(&bytes[0..2]),
            payload_size:  BigEndian::read_u16(&bytes[2..4]),
            payload_hash,
        }
    }

    /// Decode the header from the front of `bytes`. Trailing bytes are ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        let (head, _) = bytes
            .split_first_chunk::<HEADER_SIZE>()
            .ok_or(HeaderError::Truncated { len: bytes.len() })?;
        Ok(Self::from_bytes(head))
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u16::<BigEndian>(self.packet_number)?;
        writer.write_u16::<BigEndian>(self.payload_size)?;
        writer.write_all(&self.payload_hash)?;
        Ok(())
    }

    /// The declared hash as text. Non-ASCII bytes are replaced, not rejected.
    pub fn declared_hash(&self) -> String {
        String::from_utf8_lossy(&self.payload_hash).into_owned()
    }
}

/// Prepend a first-packet header to `payload`.
pub fn encode_packet(payload: &[u8]) -> Result<Vec<u8>, HeaderError> {
    let header = ControlHeader::for_payload(payload)?;
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    header.write(&mut out)?;
    out.extend_from_slice(payload);
    Ok(out)
}

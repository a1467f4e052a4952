//! Header validation and stripping.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. `packet_number` must be [`FIRST_PACKET`]
//! 2. `payload_size` must equal the number of bytes after the header
//! 3. `payload_hash` must equal the lowercase MD5 hex of those bytes
//!
//! The payload is staged in a temporary file next to the output and renamed
//! over it only once all three pass and the write has completed.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::digest::md5_hex;
use crate::header::{ControlHeader, FIRST_PACKET, HEADER_SIZE};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Input truncated: {len} bytes, control header needs {HEADER_SIZE}")]
    TruncatedInput { len: usize },
    #[error("Incorrect packet number: {got}")]
    InvalidPacketNumber { got: u16 },
    #[error("Incorrect file size: header declares {expected} bytes, payload has {actual}")]
    SizeMismatch { expected: u16, actual: u64 },
    #[error("Incorrect packet hash: header declares {expected}, payload hashes to {actual}")]
    HashMismatch { expected: String, actual: String },
}

/// Validate an in-memory packet and return the payload that follows the header.
pub fn validate_packet(bytes: &[u8]) -> Result<&[u8], ValidationError> {
    let (head, payload) = bytes
        .split_first_chunk::<HEADER_SIZE>()
        .ok_or(ValidationError::TruncatedInput { len: bytes.len() })?;
    let header = ControlHeader::from_bytes(head);
    let actual_hash = md5_hex(payload);
    debug!(
        packet_number = header.packet_number,
        payload_size = header.payload_size,
        declared_hash = %header.declared_hash(),
        actual_hash = %actual_hash,
        "decoded control header"
    );

    if header.packet_number != FIRST_PACKET {
        return Err(ValidationError::InvalidPacketNumber { got: header.packet_number });
    }

    let actual_size = payload.len() as u64;
    if u64::from(header.payload_size) != actual_size {
        return Err(ValidationError::SizeMismatch {
            expected: header.payload_size,
            actual:   actual_size,
        });
    }

    if actual_hash.as_bytes() != &header.payload_hash[..] {
        return Err(ValidationError::HashMismatch {
            expected: header.declared_hash(),
            actual:   actual_hash,
        });
    }

    Ok(payload)
}

/// Validate `input` and write its payload, without the header, to `output`.
///
/// The input and a staging file in the output's directory are opened before
/// any check runs, so an unreadable input or unwritable destination is
/// reported as [`ValidationError::Io`] up front. `output` itself is only
/// replaced after the whole payload has been written; on any failure it is
/// left as it was and the staging file is removed.
pub fn validate_and_strip<P: AsRef<Path>, Q: AsRef<Path>>(
    input:  P,
    output: Q,
) -> Result<(), ValidationError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut src = File::open(input)?;
    let mut staged = stage_in(staging_dir(output))?;

    let file_size = src.metadata()?.len();
    let mut bytes = Vec::with_capacity(file_size as usize);
    src.read_to_end(&mut bytes)?;
    debug!(path = %input.display(), file_size, "read input");

    let payload = validate_packet(&bytes)?;

    staged.write_all(payload)?;
    staged.flush()?;
    staged.persist(output).map_err(|e| e.error)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = payload.len(),
        "stripped control header"
    );
    Ok(())
}

fn stage_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".strip-header");
    // Match File::create so the renamed output is not owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

fn staging_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

//! MD5 content hashing, rendered the way the control header stores it.

// The md-5 package names its library `md5`.
use md5::{Digest, Md5};

use crate::header::HASH_LEN;

/// MD5 of `data` as 32 lowercase hex characters.
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Same digest as [`md5_hex`], as the ASCII bytes stored in the header.
pub fn md5_hex_bytes(data: &[u8]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(md5_hex(data).as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"hello"), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            md5_hex(b"The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn byte_form_matches_string_form() {
        let data = b"downlink";
        assert_eq!(&md5_hex_bytes(data)[..], md5_hex(data).as_bytes());
    }
}

pub mod header;
pub mod digest;
pub mod validate;

pub use header::{ControlHeader, HeaderError, encode_packet, HEADER_SIZE};
pub use digest::md5_hex;
pub use validate::{ValidationError, validate_and_strip, validate_packet};

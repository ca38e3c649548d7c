//! `ZBXD` framing shared by request and response.
//!
//! A frame is `b"ZBXD\x01"`, a u64 little-endian body length, then the
//! JSON body.

use crate::error::ZabbixError;

/// Protocol magic plus version byte.
pub const HEADER: &[u8; 5] = b"ZBXD\x01";

/// Total header size: magic + length field.
pub const HEADER_LEN: usize = 13;

/// Upper bound on an accepted response body. The server's answer is a
/// one-line summary; anything bigger is a protocol violation.
const MAX_BODY_LEN: usize = 1024 * 1024;

/// Wraps a JSON body in the sender-protocol frame.
pub fn encode_frame(body: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + body.len());
    frame.extend_from_slice(HEADER);
    frame.extend_from_slice(&(body.len() as u64).to_le_bytes());
    frame.extend_from_slice(body);
    frame
}

/// Extracts the body length from a response frame header.
///
/// # Errors
///
/// Returns [`ZabbixError::Protocol`] if the magic bytes do not match
/// or the announced length is implausibly large.
pub fn parse_header(header: &[u8; HEADER_LEN]) -> Result<usize, ZabbixError> {
    if &header[..HEADER.len()] != HEADER {
        return Err(ZabbixError::Protocol("bad frame magic".to_string()));
    }
    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&header[HEADER.len()..]);
    let len = u64::from_le_bytes(len_bytes) as usize;
    if len > MAX_BODY_LEN {
        return Err(ZabbixError::Protocol(format!(
            "announced body length {len} exceeds limit"
        )));
    }
    Ok(len)
}

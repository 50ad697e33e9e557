//! Size-field codecs.
//!
//! ID3v2 stores the tag size (and, in v2.4, every frame size) as a 4-byte
//! "synchsafe" integer: 7 significant bits per byte, most significant byte
//! first, so the encoded bytes never contain a `0xFF` that could be mistaken
//! for an MPEG sync word. ID3v2.3 frame sizes are plain big-endian `u32`.

use crate::error::{Result, TagError};

/// Number of bytes in every size field.
pub const SIZE_FIELD_LEN: usize = 4;

/// Largest value a synchsafe size field can carry (2^28 - 1).
pub const MAX_SYNCHSAFE: u64 = (1 << 28) - 1;

/// Encode `size` as a synchsafe integer.
///
/// Only the low 28 bits are kept; callers that may exceed [`MAX_SYNCHSAFE`]
/// must check first.
pub fn form_size(size: u64) -> [u8; SIZE_FIELD_LEN] {
    let mut out = [0u8; SIZE_FIELD_LEN];
    for (i, byte) in out.iter_mut().enumerate() {
        let shift = 7 * (SIZE_FIELD_LEN - 1 - i);
        *byte = ((size >> shift) & 0x7F) as u8;
    }
    out
}

/// Decode a synchsafe integer.
///
/// Fails if `bytes` is not exactly four bytes long or a byte has its high bit set.
pub fn parse_size(bytes: &[u8]) -> Result<u64> {
    if bytes.len() != SIZE_FIELD_LEN {
        return Err(TagError::InvalidHeader(format!(
            "size field must be {} bytes, got {}",
            SIZE_FIELD_LEN,
            bytes.len()
        )));
    }

    let mut size = 0u64;
    for &b in bytes {
        if b & 0x80 != 0 {
            return Err(TagError::InvalidHeader(format!(
                "size byte {:#04x} is not synchsafe",
                b
            )));
        }
        size = (size << 7) | u64::from(b);
    }
    Ok(size)
}

/// Encode `size` as a plain big-endian 32-bit integer (ID3v2.3 frame sizes).
pub fn form_plain_size(size: u64) -> [u8; SIZE_FIELD_LEN] {
    (size as u32).to_be_bytes()
}

/// Decode a plain big-endian 32-bit integer.
pub fn parse_plain_size(bytes: &[u8]) -> Result<u64> {
    let array: [u8; SIZE_FIELD_LEN] = bytes.try_into().map_err(|_| {
        TagError::InvalidHeader(format!(
            "size field must be {} bytes, got {}",
            SIZE_FIELD_LEN,
            bytes.len()
        ))
    })?;
    Ok(u64::from(u32::from_be_bytes(array)))
}

//! # ABI Codec for `checkHash(string)`
//!
//! Minimal Solidity ABI encoding for the single registry call this
//! client makes: `checkHash(string) returns (string)`. Both sides are a
//! dynamic string — a head word holding the payload offset, a length
//! word, then the UTF-8 bytes right-padded to a 32-byte boundary.

use crate::error::RegistryError;

/// 4-byte function selector for `checkHash(string)`.
/// keccak256("checkHash(string)") = 0xe670f7cd...
pub const CHECK_HASH_SELECTOR: &str = "e670f7cd";

/// Hex characters per ABI word.
const WORD_HEX: usize = 64;

/// Build the `0x`-prefixed calldata for `checkHash(hashHex)`.
pub fn encode_check_hash_call(hash_hex: &str) -> String {
    let payload = hash_hex.as_bytes();
    let mut data = String::with_capacity(2 + 8 + WORD_HEX * 2 + payload.len() * 2 + WORD_HEX);
    data.push_str("0x");
    data.push_str(CHECK_HASH_SELECTOR);
    // Head: offset of the dynamic payload, relative to the argument block.
    data.push_str(&encode_word(32));
    data.push_str(&encode_word(payload.len() as u64));
    data.push_str(&encode_padded_bytes(payload));
    data
}

/// Decode the ABI-encoded string an `eth_call` to `checkHash` returns.
pub fn decode_string_return(result_hex: &str) -> Result<String, RegistryError> {
    // Work on bytes so a hostile response cannot force a slice inside a
    // multi-byte character.
    let hex = result_hex
        .strip_prefix("0x")
        .unwrap_or(result_hex)
        .as_bytes();
    if hex.len() < WORD_HEX * 2 {
        return Err(RegistryError::InvalidResponse {
            reason: format!("return data too short: {} hex chars", hex.len()),
        });
    }

    let offset = decode_word(&hex[..WORD_HEX])? as usize;
    let len_start = offset
        .checked_mul(2)
        .filter(|start| start + WORD_HEX <= hex.len())
        .ok_or_else(|| RegistryError::InvalidResponse {
            reason: format!("payload offset {offset} out of range"),
        })?;
    let len = decode_word(&hex[len_start..len_start + WORD_HEX])? as usize;

    let data_start = len_start + WORD_HEX;
    let data_end = data_start
        .checked_add(len * 2)
        .filter(|end| *end <= hex.len())
        .ok_or_else(|| RegistryError::InvalidResponse {
            reason: format!("payload length {len} exceeds return data"),
        })?;

    let mut bytes = Vec::with_capacity(len);
    for pair in hex[data_start..data_end].chunks_exact(2) {
        bytes.push(hex_pair(pair[0], pair[1])?);
    }

    String::from_utf8(bytes).map_err(|_| RegistryError::InvalidResponse {
        reason: "payload is not valid UTF-8".to_string(),
    })
}

fn hex_pair(hi: u8, lo: u8) -> Result<u8, RegistryError> {
    let nibble = |c: u8| -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    };
    match (nibble(hi), nibble(lo)) {
        (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
        _ => Err(RegistryError::InvalidResponse {
            reason: "non-hex byte in payload".to_string(),
        }),
    }
}

fn encode_word(value: u64) -> String {
    format!("{value:064x}")
}

fn decode_word(word_hex: &[u8]) -> Result<u64, RegistryError> {
    // Dynamic-string offsets and lengths fit in the low 8 bytes; a
    // nonzero high part means the word is not a plausible offset/length.
    let (high, low) = word_hex.split_at(WORD_HEX - 16);
    if high.iter().any(|b| *b != b'0') {
        return Err(RegistryError::InvalidResponse {
            reason: format!("implausible ABI word: {}", String::from_utf8_lossy(word_hex)),
        });
    }
    let low = std::str::from_utf8(low).map_err(|_| RegistryError::InvalidResponse {
        reason: "non-hex ABI word".to_string(),
    })?;
    u64::from_str_radix(low, 16).map_err(|_| RegistryError::InvalidResponse {
        reason: format!("non-hex ABI word: {low}"),
    })
}

fn encode_padded_bytes(payload: &[u8]) -> String {
    let padded_len = payload.len().div_ceil(32) * 32;
    let mut out = String::with_capacity(padded_len * 2);
    for byte in payload {
        out.push_str(&format!("{byte:02x}"));
    }
    for _ in payload.len()..padded_len {
        out.push_str("00");
    }
    out
}

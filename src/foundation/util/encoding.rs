use crate::foundation::BridgeError;

pub const ADDRESS_LEN: usize = 20;

pub fn decode_hex(s: &str) -> Result<Vec<u8>, BridgeError> {
    let trimmed = s.trim();
    let stripped = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
    hex::decode(stripped).map_err(|e| e.into())
}

pub fn parse_hex_20bytes(s: &str) -> Result<[u8; ADDRESS_LEN], BridgeError> {
    let bytes = decode_hex(s)?;
    <[u8; ADDRESS_LEN]>::try_from(bytes.as_slice())
        .map_err(|_| BridgeError::EncodingError(format!("expected {} bytes, got {}", ADDRESS_LEN, bytes.len())))
}

/// Parses an externally supplied nonce. Only plain decimal digits are accepted.
pub fn parse_nonce(input: &str) -> Result<u64, BridgeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BridgeError::invalid_nonce(input));
    }
    trimmed.parse::<u64>().map_err(|_| BridgeError::invalid_nonce(input))
}

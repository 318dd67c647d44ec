// src/utils/strings.rs

/// Decode a NUL-terminated ASCII field: everything before the first NUL
/// byte (or the whole slice if none), with invalid sequences replaced.
pub(crate) fn decode_cstr(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).to_string()
}

/// Decode an ASCII field padded with trailing NUL bytes.
pub(crate) fn decode_padded_str(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    String::from_utf8_lossy(&bytes[..end]).to_string()
}

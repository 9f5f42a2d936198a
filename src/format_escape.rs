const HEX: &[u8; 16] = b"0123456789abcdef";

/// Escape raw bytes for placement between the quotes of a JSON string.
///
/// Works byte by byte. Every trigger byte is ASCII, so UTF-8 multi-byte
/// sequences pass through untouched. `/` is escaped too, which JSON allows
/// but does not require.
pub fn escape(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    escape_into(&mut out, input);
    out
}

/// Append the escaped form of `input` to `out`.
pub fn escape_into(out: &mut Vec<u8>, input: &[u8]) {
    for &b in input {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'/' => out.extend_from_slice(b"\\/"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0c => out.extend_from_slice(b"\\f"),
            b if b < 0x20 || b == 0x7f => {
                out.extend_from_slice(b"\\u00");
                out.push(HEX[(b >> 4) as usize]);
                out.push(HEX[(b & 0x0f) as usize]);
            }
            b => out.push(b),
        }
    }
}

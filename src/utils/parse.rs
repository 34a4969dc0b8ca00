//! Tolerant unsigned text parsing for attribute stores.

use super::Error;

/// Parse unsigned text in a self-selecting base: a `0x`/`0X` prefix means
/// hexadecimal, a leading `0` octal, anything else decimal. Surrounding
/// whitespace (including the trailing newline handed over by the attribute
/// layer) is ignored, as is a single leading `+`.
pub fn parse_uint(text: &str) -> Result<u32, Error> {
    let s = text.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() {
        return Err(Error::EINVAL);
    }
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s != "0" && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    u32::from_str_radix(digits, radix).map_err(|_| Error::EINVAL)
}

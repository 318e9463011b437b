//! Byte-offset parsing for the `-o` flag.
//!
//! The base is auto-detected the way the tool has always done it: an
//! explicit `0x`/`0X` prefix means hex, any bare a-f/A-F letter anywhere in
//! the string also means hex, everything else is decimal. So "250" is 250,
//! while "fa" and "1a2" are 0xfa and 0x1a2. A stray hex letter in a value
//! meant as decimal drags the whole string into hex; that quirk is part of
//! the documented behavior and is kept.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid offset {text:?}: expected a decimal or hex byte offset (i.e 250 or 0xfa)")]
pub struct ParseOffsetError {
    pub text: String,
}

/// Parses the textual EEPROM offset, auto-detecting decimal vs hex.
pub fn parse(text: &str) -> Result<u64, ParseOffsetError> {
    let t = text.trim();
    let err = || ParseOffsetError {
        text: text.to_string(),
    };

    if let Some(rest) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return u64::from_str_radix(rest, 16).map_err(|_| err());
    }
    if t.contains(|c: char| matches!(c, 'a'..='f' | 'A'..='F')) {
        return u64::from_str_radix(t, 16).map_err(|_| err());
    }
    t.parse::<u64>().map_err(|_| err())
}

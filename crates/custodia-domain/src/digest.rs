use core::fmt;
use std::fmt::Write as _;

/// A SHA-256 content digest, displayed as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest32([u8; 32]);

impl Digest32 {
    pub const HEX_LEN: usize = 64;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(Self::HEX_LEN);
        for byte in self.0 {
            // Safety: writing hex pairs into a String cannot fail.
            write!(out, "{byte:02x}").expect("hex is utf8");
        }
        out
    }

    pub fn from_hex(hex: &str) -> Result<Self, ParseHexError> {
        if hex.len() != Self::HEX_LEN {
            return Err(ParseHexError::InvalidLength { actual: hex.len() });
        }

        let raw = hex.as_bytes();
        let mut bytes = [0_u8; 32];
        for (i, out) in bytes.iter_mut().enumerate() {
            let hi = hex_value(raw[i * 2]).ok_or(ParseHexError::InvalidDigit { index: i * 2 })?;
            let lo = hex_value(raw[i * 2 + 1])
                .ok_or(ParseHexError::InvalidDigit { index: i * 2 + 1 })?;
            *out = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest32").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseHexError {
    InvalidLength { actual: usize },
    InvalidDigit { index: usize },
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let digest = Digest32::from_bytes([0xAB_u8; 32]);
        let encoded = digest.to_hex();
        assert_eq!(encoded.len(), Digest32::HEX_LEN);
        assert_eq!(Digest32::from_hex(&encoded).expect("valid hex"), digest);
    }

    #[test]
    fn from_hex_accepts_uppercase() {
        let digest = Digest32::from_bytes([0xCD_u8; 32]);
        let upper = digest.to_hex().to_uppercase();
        assert_eq!(Digest32::from_hex(&upper).expect("valid hex"), digest);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Digest32::from_hex("00").unwrap_err();
        assert_eq!(err, ParseHexError::InvalidLength { actual: 2 });
    }

    #[test]
    fn from_hex_rejects_non_hex_digit() {
        let mut hex = "0".repeat(64);
        hex.replace_range(10..11, "g");
        let err = Digest32::from_hex(&hex).unwrap_err();
        assert_eq!(err, ParseHexError::InvalidDigit { index: 10 });
    }
}

//! Source text metadata carried next to a tree.

use sha2::{Digest, Sha256, Sha512};

/// Encoding of the bytes a tree was read from, as told by the byte-order mark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
}

impl Encoding {
    const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
    const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
    const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

    /// Detects the encoding from a leading byte-order mark; plain UTF-8
    /// without one.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(Self::UTF8_BOM) {
            Self::Utf8Bom
        } else if bytes.starts_with(Self::UTF16_LE_BOM) {
            Self::Utf16Le
        } else if bytes.starts_with(Self::UTF16_BE_BOM) {
            Self::Utf16Be
        } else {
            Self::Utf8
        }
    }

    pub fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[],
            Self::Utf8Bom => Self::UTF8_BOM,
            Self::Utf16Le => Self::UTF16_LE_BOM,
            Self::Utf16Be => Self::UTF16_BE_BOM,
        }
    }

    /// Decodes `bytes`, byte-order mark excluded. Returns `None` for
    /// malformed input.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let bytes = bytes.strip_prefix(self.bom()).unwrap_or(bytes);
        match self {
            Self::Utf8 | Self::Utf8Bom => String::from_utf8(bytes.to_vec()).ok(),
            Self::Utf16Le | Self::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return None;
                }
                let units = bytes.chunks_exact(2).map(|pair| {
                    let pair = [pair[0], pair[1]];
                    if self == Self::Utf16Le { u16::from_le_bytes(pair) } else { u16::from_be_bytes(pair) }
                });
                char::decode_utf16(units).collect::<Result<String, _>>().ok()
            }
        }
    }

    /// Encodes `text` with this encoding's byte-order mark.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut bytes = self.bom().to_vec();
        match self {
            Self::Utf8 | Self::Utf8Bom => bytes.extend_from_slice(text.as_bytes()),
            Self::Utf16Le => bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes)),
            Self::Utf16Be => bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes)),
        }
        bytes
    }
}

/// Hash used for source checksums.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceHashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl SourceHashAlgorithm {
    /// Hashes the encoded form of `text`.
    pub fn checksum(self, encoding: Encoding, text: &str) -> Vec<u8> {
        let bytes = encoding.encode(text);
        match self {
            Self::Sha256 => Sha256::digest(&bytes).to_vec(),
            Self::Sha512 => Sha512::digest(&bytes).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_marks() {
        assert_eq!(Encoding::detect(b"class C {}"), Encoding::Utf8);
        assert_eq!(Encoding::detect(b"\xEF\xBB\xBFclass"), Encoding::Utf8Bom);
        assert_eq!(Encoding::detect(&[0xFF, 0xFE, b'c', 0]), Encoding::Utf16Le);

        let bytes = Encoding::Utf16Be.encode("a\u{e9}");
        assert_eq!(bytes, [0xFE, 0xFF, 0, b'a', 0, 0xE9]);
        assert_eq!(Encoding::detect(&bytes).decode(&bytes).as_deref(), Some("a\u{e9}"));
        assert_eq!(Encoding::Utf16Le.decode(&[0xFF, 0xFE, 0x61]), None);
    }

    #[test]
    fn checksum_widths() {
        let sha256 = SourceHashAlgorithm::default().checksum(Encoding::Utf8, "class C { }");
        let sha512 = SourceHashAlgorithm::Sha512.checksum(Encoding::Utf8, "class C { }");
        assert_eq!(sha256.len(), 32);
        assert_eq!(sha512.len(), 64);
        assert_ne!(sha256, SourceHashAlgorithm::Sha256.checksum(Encoding::Utf8Bom, "class C { }"));
    }
}

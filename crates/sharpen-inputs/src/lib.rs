//! Salsa inputs: the source files a database knows about.

use camino::Utf8PathBuf;
pub use line_index::LineIndex;
use sharpen_syntax::{Encoding, ParseOptions};

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    pub encoding: Encoding,
    #[returns(ref)]
    pub options: ParseOptions,
}

impl File {
    /// A UTF-8 file parsed with default options.
    pub fn from_text(
        db: &dyn salsa::Database,
        path: impl Into<Utf8PathBuf>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(db, path.into(), text.into(), Encoding::Utf8, ParseOptions::default())
    }

    /// Decodes `bytes` according to their byte-order mark. Returns `None`
    /// when they are not valid in the detected encoding.
    pub fn from_bytes(
        db: &dyn salsa::Database,
        path: impl Into<Utf8PathBuf>,
        bytes: &[u8],
        options: ParseOptions,
    ) -> Option<Self> {
        let encoding = Encoding::detect(bytes);
        let text = encoding.decode(bytes)?;
        Some(Self::new(db, path.into(), text, encoding, options))
    }
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

#[cfg(test)]
mod tests {
    use line_index::{LineCol, TextSize};
    use salsa::{DatabaseImpl, Setter};

    use super::*;

    #[test]
    fn decodes_byte_order_mark() {
        let db = DatabaseImpl::new();
        let file = File::from_bytes(&db, "a.cs", b"\xEF\xBB\xBFclass C {}", ParseOptions::default())
            .unwrap();
        assert_eq!(file.encoding(&db), Encoding::Utf8Bom);
        assert_eq!(file.text(&db), "class C {}");

        let invalid = File::from_bytes(&db, "b.cs", &[0xFF, 0xFE, 0x00], ParseOptions::default());
        assert!(invalid.is_none());
    }

    #[test]
    fn line_index_follows_text() {
        let mut db = DatabaseImpl::new();
        let file = File::from_text(&db, "a.cs", "class C\n{\n}");
        let position = file.line_index(&db).line_col(TextSize::new(8));
        assert_eq!(position, LineCol { line: 1, col: 0 });

        file.set_text(&mut db).to("\n\nclass C {}".to_owned());
        let position = file.line_index(&db).line_col(TextSize::new(8));
        assert_eq!(position, LineCol { line: 2, col: 6 });
    }
}

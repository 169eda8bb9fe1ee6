//! Best-effort text encoding detection.
//!
//! Input tables come from spreadsheet exports with no declared encoding.
//! Detection is heuristic: BOM sniffing first, then a UTF-8 validity check,
//! then a byte-frequency fallback to windows-1252 for legacy exports. The
//! detected encoding is an observable (logged) side effect with no contract
//! on the exact algorithm.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Guess the encoding of a raw byte buffer.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }
    // Invalid as UTF-8: legacy single-byte export. Log how much of the file
    // is outside ASCII so surprising detections can be diagnosed.
    let high = bytes.iter().filter(|b| !b.is_ascii()).count();
    debug!(
        high_bytes = high,
        total = bytes.len(),
        "non-UTF-8 input, assuming windows-1252"
    );
    WINDOWS_1252
}

/// Read a file, detect its encoding and decode it to a `String`.
///
/// Returns the decoded text together with the detected encoding.
pub fn read_to_string(path: &Path) -> Result<(String, &'static Encoding)> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::MissingInputFile {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let encoding = detect_encoding(&bytes);
    let (text, _actual, _had_errors) = encoding.decode(&bytes);
    Ok((text.into_owned(), encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_plain_utf8() {
        assert_eq!(detect_encoding(b"gene\tcolA\ng1\t1.0\n"), UTF_8);
        assert_eq!(detect_encoding("gene\tcol\u{e9}\n".as_bytes()), UTF_8);
    }

    #[test]
    fn detects_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"gene\tcolA\n");
        assert_eq!(detect_encoding(&bytes), UTF_8);
    }

    #[test]
    fn detects_utf16_bom() {
        assert_eq!(
            detect_encoding(&[0xFF, 0xFE, b'g', 0x00]),
            encoding_rs::UTF_16LE
        );
        assert_eq!(
            detect_encoding(&[0xFE, 0xFF, 0x00, b'g']),
            encoding_rs::UTF_16BE
        );
    }

    #[test]
    fn falls_back_to_windows_1252() {
        // 0xE9 alone is invalid UTF-8 but is 'é' in windows-1252.
        let bytes = b"gene\tcol\xe9\n";
        let encoding = detect_encoding(bytes);
        assert_eq!(encoding, WINDOWS_1252);
        let (text, _, _) = encoding.decode(bytes);
        assert!(text.contains('\u{e9}'));
    }
}

//! Text decoding with byte-budget truncation.
//!
//! Reading strategy:
//! - UTF-8 BOM is stripped, UTF-16 LE/BE BOMs decode through `encoding_rs`
//! - everything else decodes as UTF-8 with malformed sequences dropped
//! - the decoded text is cut at the last char boundary within the byte budget

use encoding_rs::{Decoder, DecoderResult, Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const READ_CHUNK: usize = 8 * 1024;

/// Decoded and possibly truncated file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrefix {
    pub content: String,
    pub truncated: bool,
}

/// Read at most `max_bytes` of UTF-8 text from `path`.
///
/// The file is decoded chunk by chunk and reading stops once the decoded text
/// exceeds the budget, so the bound is on output, not on raw input: malformed
/// bytes are skipped without using up the budget. Decoding never fails; I/O
/// errors are returned as-is.
pub fn read_text_prefix(path: &Path, max_bytes: usize) -> io::Result<TextPrefix> {
    let mut file = File::open(path)?;

    let mut head = Vec::with_capacity(3);
    (&mut file).take(3).read_to_end(&mut head)?;
    let mut eof = head.len() < 3;

    let mut decoder = decoder_for(&head);
    let bom_len = Encoding::for_bom(&head).map_or(0, |(_, len)| len);
    let mut decoded = String::new();
    decode_dropping_malformed(&mut decoder, &head[bom_len..], eof, &mut decoded);

    let mut chunk = vec![0u8; READ_CHUNK];
    // One byte past the budget is enough to know the content was cut.
    while !eof && decoded.len() <= max_bytes {
        let n = match file.read(&mut chunk) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        eof = n == 0;
        decode_dropping_malformed(&mut decoder, &chunk[..n], eof, &mut decoded);
    }

    let kept = truncate_to_byte_budget(&decoded, max_bytes).len();
    let truncated = kept < decoded.len();
    decoded.truncate(kept);

    Ok(TextPrefix { content: decoded, truncated })
}

/// Decode bytes to text, honoring BOMs and ignoring malformed input.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut decoder = decoder_for(bytes);
    let bom_len = Encoding::for_bom(bytes).map_or(0, |(_, len)| len);
    let mut out = String::with_capacity(bytes.len());
    decode_dropping_malformed(&mut decoder, &bytes[bom_len..], true, &mut out);
    out
}

fn decoder_for(head: &[u8]) -> Decoder {
    let encoding = Encoding::for_bom(head).map_or(UTF_8, |(encoding, _)| encoding);
    encoding.new_decoder_without_bom_handling()
}

/// Append the decoding of `src` to `out`, skipping malformed sequences.
///
/// Incomplete sequences at the end of `src` stay buffered in `decoder` unless `last` is set.
fn decode_dropping_malformed(decoder: &mut Decoder, mut src: &[u8], last: bool, out: &mut String) {
    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .unwrap_or(src.len().saturating_mul(3).saturating_add(16));
        out.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(src, out, last);
        src = &src[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull | DecoderResult::Malformed(_, _) => {}
        }
    }
}

/// Longest prefix of `text` that is at most `max_bytes` long and ends on a char boundary.
pub fn truncate_to_byte_budget(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_ascii_prefix_is_exact() {
        let body = "x".repeat(5000);
        let file = temp_file(body.as_bytes());

        let prefix = read_text_prefix(file.path(), 4000).unwrap();
        assert_eq!(prefix.content.len(), 4000);
        assert_eq!(prefix.content, body[..4000]);
        assert!(prefix.truncated);
    }

    #[test]
    fn test_short_file_not_truncated() {
        let file = temp_file("Test content 🚀".as_bytes());

        let prefix = read_text_prefix(file.path(), 1000).unwrap();
        assert_eq!(prefix.content, "Test content 🚀");
        assert!(!prefix.truncated);
    }

    #[test]
    fn test_multibyte_cut_lands_on_char_boundary() {
        // "é" is two bytes; a 3-byte budget cannot hold the second one.
        let file = temp_file("éé".as_bytes());

        let prefix = read_text_prefix(file.path(), 3).unwrap();
        assert_eq!(prefix.content, "é");
        assert!(prefix.truncated);
    }

    #[test]
    fn test_invalid_utf8_is_dropped_not_replaced() {
        let file = temp_file(&[b'a', 0xff, 0xfe, b'b', 0xc3]);

        let prefix = read_text_prefix(file.path(), 100).unwrap();
        assert_eq!(prefix.content, "ab");
    }

    #[test]
    fn test_leading_invalid_run_does_not_consume_budget() {
        let mut bytes = vec![0xffu8; 3000];
        bytes.extend_from_slice(b"hello world");
        let file = temp_file(&bytes);

        let prefix = read_text_prefix(file.path(), 1000).unwrap();
        assert_eq!(prefix.content, "hello world");
        assert!(!prefix.truncated);
    }

    #[test]
    fn test_budget_counts_decoded_bytes_across_chunks() {
        let mut bytes = Vec::new();
        for _ in 0..4 {
            bytes.extend(std::iter::repeat(0xfeu8).take(READ_CHUNK));
            bytes.extend_from_slice(b"abcde");
        }
        let file = temp_file(&bytes);

        let prefix = read_text_prefix(file.path(), 12).unwrap();
        assert_eq!(prefix.content, "abcdeabcdeab");
        assert!(prefix.truncated);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        // Three bytes of BOM sniffing plus one full chunk ends on the first byte of "é".
        let mut bytes = vec![b'a'; READ_CHUNK + 2];
        bytes.extend_from_slice("é!".as_bytes());
        let file = temp_file(&bytes);

        let prefix = read_text_prefix(file.path(), READ_CHUNK + 10).unwrap();
        assert!(prefix.content.ends_with("é!"));
        assert!(!prefix.truncated);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let file = temp_file(&[0xef, 0xbb, 0xbf, b'h', b'i']);

        let prefix = read_text_prefix(file.path(), 100).unwrap();
        assert_eq!(prefix.content, "hi");
    }

    #[test]
    fn test_utf16_le_bom_decodes() {
        let file = temp_file(&[0xff, 0xfe, b'h', 0x00, b'i', 0x00]);

        let prefix = read_text_prefix(file.path(), 100).unwrap();
        assert_eq!(prefix.content, "hi");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_text_prefix(&dir.path().join("nope.txt"), 10).is_err());
    }

    #[test]
    fn test_truncate_to_byte_budget() {
        assert_eq!(truncate_to_byte_budget("hello", 10), "hello");
        assert_eq!(truncate_to_byte_budget("hello", 3), "hel");
        assert_eq!(truncate_to_byte_budget("日本", 4), "日");
    }
}

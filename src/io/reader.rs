use super::TextEncoding;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a newline-delimited wordlist into samples, one per line.
///
/// A trailing newline does not produce an extra sample; blank lines in the
/// middle do, so they reach the meter and get reported like any other sample.
pub fn read_samples(path: &Path, encoding: TextEncoding, trim: bool) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read password file: {}", path.display()))?;

    let samples = decode_lines(&bytes, encoding, trim);
    tracing::debug!("{} lines decoded from {}", samples.len(), path.display());
    Ok(samples)
}

/// Split raw bytes into decoded lines (`\n` or `\r\n`)
pub fn decode_lines(bytes: &[u8], encoding: TextEncoding, trim: bool) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }

    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let decoded = encoding.decode(line);
            if trim {
                decoded.trim().to_string()
            } else {
                decoded
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_basic_lines() {
        let lines = decode_lines(b"one\ntwo\nthree\n", TextEncoding::Utf8, true);
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let lines = decode_lines(b"one\ntwo", TextEncoding::Utf8, true);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let lines = decode_lines(b"a\r\n\r\nb\r\n", TextEncoding::Utf8, false);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_trim_whitespace() {
        let lines = decode_lines(b"  padded \n\tx\n", TextEncoding::Utf8, true);
        assert_eq!(lines, vec!["padded", "x"]);

        let lines = decode_lines(b"  padded \n", TextEncoding::Utf8, false);
        assert_eq!(lines, vec!["  padded "]);
    }

    #[test]
    fn test_latin1_decoding() {
        let lines = decode_lines(b"caf\xe9\nna\xefve\n", TextEncoding::Latin1, true);
        assert_eq!(lines, vec!["café", "naïve"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_lines(b"", TextEncoding::Utf8, true).is_empty());
        assert_eq!(decode_lines(b"\n", TextEncoding::Utf8, true), vec![""]);
    }

    #[test]
    fn test_read_samples_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.txt");
        fs::write(&path, "123456\npassword\n").unwrap();

        let samples = read_samples(&path, TextEncoding::Utf8, true).unwrap();
        assert_eq!(samples, vec!["123456", "password"]);
    }

    #[test]
    fn test_missing_file_has_context() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_samples(&temp_dir.path().join("nope.txt"), TextEncoding::Utf8, true).unwrap_err();
        assert!(err.to_string().contains("Failed to read password file"));
    }
}

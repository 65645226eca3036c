//! Fetching the rule list text from disk or the network.

use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::Result;

/// Gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Download a rule list, inflating it if the payload is gzip.
pub fn download_list(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;

    log::info!("Downloading rule list from {}", url);

    let response = client.get(url).send()?.error_for_status()?;
    let body = response.bytes()?;

    let text = decode_body(&body)?;
    log::debug!("Downloaded {} bytes ({} lines)", body.len(), text.lines().count());
    Ok(text)
}

/// Read a rule list file, plain or gzipped.
pub fn read_list_file(path: &Path) -> Result<String> {
    let body = fs::read(path)?;
    decode_body(&body)
}

/// Turn a possibly gzipped payload into text.
///
/// Invalid UTF-8 is replaced, compressed or not.
pub(crate) fn decode_body(body: &[u8]) -> Result<String> {
    if body.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(body);
        let mut inflated = Vec::new();
        decoder.read_to_end(&mut inflated)?;
        return Ok(String::from_utf8_lossy(&inflated).into_owned());
    }

    Ok(String::from_utf8_lossy(body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_decode_plain_body() {
        assert_eq!(decode_body(b"com\nnet\n").unwrap(), "com\nnet\n");
    }

    #[test]
    fn test_read_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.dat");
        std::fs::write(&path, "com\n").unwrap();

        assert_eq!(read_list_file(&path).unwrap(), "com\n");
        assert!(read_list_file(&dir.path().join("missing.dat")).is_err());
    }

    #[test]
    fn test_decode_gzip_body() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"*.kobe.jp\n!city.kobe.jp\n").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(
            decode_body(&compressed).unwrap(),
            "*.kobe.jp\n!city.kobe.jp\n"
        );
    }

    #[test]
    fn test_invalid_utf8_same_with_and_without_gzip() {
        let raw: &[u8] = b"com\n\xffbad\nnet\n";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(raw).unwrap();
        let compressed = encoder.finish().unwrap();

        let plain = decode_body(raw).unwrap();
        assert_eq!(plain, "com\n\u{fffd}bad\nnet\n");
        assert_eq!(decode_body(&compressed).unwrap(), plain);
    }
}

//! Uploaded image validation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::error::{ReverieError, Result};

/// Largest accepted upload, in decoded bytes.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

const SUPPORTED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/heic",
];

/// A validated, base64-encoded photo.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    mime_type: String,
    base64: String,
    byte_len: usize,
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

impl ImageData {
    /// Parses a `data:` URI or a bare base64 string.
    ///
    /// Bare base64 has its type sniffed from the decoded bytes.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ReverieError::invalid_input("Image data is empty"));
        }

        let (declared_mime, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or_else(|| {
                    ReverieError::invalid_input("Data URI is missing its ',' separator")
                })?;
                // `<mime>[;param=value]*;base64`
                let mut params = header.split(';');
                let mime = params.next().unwrap_or_default().trim();
                if !params.last().is_some_and(|p| p.trim().eq_ignore_ascii_case("base64")) {
                    return Err(ReverieError::invalid_input(
                        "Only base64-encoded data URIs are supported",
                    ));
                }
                (Some(mime.to_ascii_lowercase()), payload)
            }
            None => (None, input),
        };

        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64_STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| ReverieError::invalid_input(format!("Image is not valid base64: {}", e)))?;

        let image = Self::from_bytes(&bytes, declared_mime.as_deref())?;
        Ok(image)
    }

    /// Encodes raw file bytes, sniffing the type when none is declared.
    pub fn from_bytes(bytes: &[u8], declared_mime: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ReverieError::invalid_input("Image file is empty"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ReverieError::invalid_input(format!(
                "Image is {} bytes; the limit is {} bytes",
                bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }

        let mime_type = match declared_mime {
            Some(mime) => mime.to_ascii_lowercase(),
            None => sniff_mime_type(bytes)
                .ok_or_else(|| ReverieError::invalid_input("Unrecognized image format"))?
                .to_string(),
        };
        if !SUPPORTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(ReverieError::invalid_input(format!(
                "Unsupported image type: {}",
                mime_type
            )));
        }

        Ok(Self {
            mime_type,
            base64: BASE64_STANDARD.encode(bytes),
            byte_len: bytes.len(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64_STANDARD
            .decode(self.base64.as_bytes())
            .map_err(|e| ReverieError::internal(format!("Stored image is not valid base64: {}", e)))
    }
}

/// Identifies common image formats by their magic bytes.
fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.len() >= 12 && &bytes[4..12] == b"ftypheic" {
        Some("image/heic")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_parse_data_uri() {
        let uri = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(PNG_HEADER));
        let image = ImageData::parse(&uri).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.byte_len(), PNG_HEADER.len());
        assert_eq!(image.to_data_uri(), uri);
    }

    #[test]
    fn test_parse_data_uri_with_parameters() {
        let payload = BASE64_STANDARD.encode(PNG_HEADER);
        let image = ImageData::parse(&format!("data:image/PNG;name=a.png;base64,{}", payload)).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.byte_len(), PNG_HEADER.len());

        let err = ImageData::parse(&format!("data:image/png;base64;name=a.png,{}", payload))
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_parse_bare_base64_sniffs_type() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let image = ImageData::parse(&BASE64_STANDARD.encode(jpeg)).unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.decode().unwrap(), jpeg.to_vec());
    }

    #[test]
    fn test_rejects_non_image_payloads() {
        let err = ImageData::parse(&BASE64_STANDARD.encode(b"just some text")).unwrap_err();
        assert!(err.is_invalid_input());

        let err = ImageData::parse("data:application/pdf;base64,JVBERi0=").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(ImageData::parse("").unwrap_err().is_invalid_input());
        assert!(ImageData::parse("data:image/png;base64").unwrap_err().is_invalid_input());
        assert!(ImageData::parse("data:image/png,plain").unwrap_err().is_invalid_input());
        assert!(ImageData::parse("%%%not-base64%%%").unwrap_err().is_invalid_input());
    }
}

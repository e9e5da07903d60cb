//! Base64 decoding layer.
//!
//! Decoding is lenient about padding: both `aGk=` and `aGk` decode to `hi`.

use std::io::{self, Read};

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::read::DecoderReader;
use compress::BoxedReader;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

static STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
static URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Alphabet and framing of a base64 layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Base64Variant {
    /// RFC 4648 standard alphabet. Any non-alphabet byte is an error.
    #[default]
    Standard,
    /// RFC 4648 URL and filename safe alphabet.
    UrlSafe,
    /// RFC 2045 MIME framing: standard alphabet, line breaks and any other
    /// non-alphabet bytes are skipped.
    Mime,
}

impl Base64Variant {
    /// Wraps `input` with a decoder for this variant.
    pub fn decoder(self, input: BoxedReader) -> BoxedReader {
        match self {
            Self::Standard => Box::new(DecoderReader::new(input, &STANDARD)),
            Self::UrlSafe => Box::new(DecoderReader::new(input, &URL_SAFE)),
            Self::Mime => Box::new(DecoderReader::new(MimeFilter::new(input), &STANDARD)),
        }
    }
}

/// Drops every byte outside the standard alphabet and `=`.
struct MimeFilter<R> {
    inner: R,
}

impl<R: Read> MimeFilter<R> {
    const fn new(inner: R) -> Self {
        Self { inner }
    }
}

const fn is_mime_byte(byte: u8) -> bool {
    matches!(byte, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' | b'=')
}

impl<R: Read> Read for MimeFilter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let read = self.inner.read(buf)?;
            if read == 0 {
                return Ok(0);
            }
            let mut kept = 0;
            for index in 0..read {
                let byte = buf[index];
                if is_mime_byte(byte) {
                    buf[kept] = byte;
                    kept += 1;
                }
            }
            if kept > 0 {
                return Ok(kept);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn decode(variant: Base64Variant, encoded: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        variant
            .decoder(Box::new(Cursor::new(encoded.to_vec())))
            .read_to_end(&mut out)?;
        Ok(out)
    }

    #[test]
    fn standard_decodes_padded_and_unpadded() {
        assert_eq!(decode(Base64Variant::Standard, b"aGk=").expect("padded"), b"hi");
        assert_eq!(decode(Base64Variant::Standard, b"aGk").expect("unpadded"), b"hi");
    }

    #[test]
    fn standard_rejects_line_breaks() {
        assert!(decode(Base64Variant::Standard, b"aGVs\nbG8=").is_err());
    }

    #[test]
    fn url_safe_uses_its_alphabet() {
        let encoded = base64::engine::general_purpose::URL_SAFE.encode([0xfb, 0xff]);
        assert_eq!(encoded, "-_8=");
        assert_eq!(
            decode(Base64Variant::UrlSafe, encoded.as_bytes()).expect("decode"),
            [0xfb, 0xff]
        );
    }

    #[test]
    fn mime_skips_line_breaks_and_noise() {
        let encoded = b"aGVs\r\nbG8g\r\n d29y*bGQ=\r\n";
        assert_eq!(
            decode(Base64Variant::Mime, encoded).expect("decode"),
            b"hello world"
        );
    }

    #[test]
    fn mime_of_only_noise_is_empty() {
        assert_eq!(decode(Base64Variant::Mime, b"\r\n\r\n").expect("decode"), b"");
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(Base64Variant::default(), Base64Variant::Standard);
    }

    proptest! {
        #[test]
        fn standard_round_trips(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&data);
            prop_assert_eq!(decode(Base64Variant::Standard, encoded.as_bytes()).unwrap(), data);
        }

        #[test]
        fn mime_round_trips_wrapped_output(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&data);
            let wrapped: Vec<u8> = encoded
                .as_bytes()
                .chunks(76)
                .flat_map(|line| line.iter().copied().chain(*b"\r\n"))
                .collect();
            prop_assert_eq!(decode(Base64Variant::Mime, &wrapped).unwrap(), data);
        }
    }
}

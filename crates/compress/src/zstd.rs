#![allow(clippy::module_name_repetitions)]

//! Zstandard adapters.
//!
//! The interface mirrors the deflate helpers so callers can register
//! `.zst` handling next to the built-in `.gz` entry without touching the
//! chain assembly code.

use std::io::{self, BufReader, Read, Write};

use crate::zlib::CompressionLevel;
use zstd::stream::{
    read::Decoder as ZstdDecoder,
    write::{AutoFinishEncoder, Encoder as ZstdEncoder},
};

/// Wraps `reader` with a streaming Zstandard decoder.
pub fn decoder<R: Read>(reader: R) -> io::Result<ZstdDecoder<'static, BufReader<R>>> {
    ZstdDecoder::new(reader)
}

/// Wraps `writer` with a Zstandard encoder that finishes the frame on drop.
pub fn encoder<W: Write>(
    writer: W,
    level: CompressionLevel,
) -> io::Result<AutoFinishEncoder<'static, W>> {
    Ok(ZstdEncoder::new(writer, zstd_level(level))?.auto_finish())
}

/// Compresses `input` into a new [`Vec`].
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = ZstdEncoder::new(Vec::new(), zstd_level(level))?;
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses `input` into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = decoder(input)?;
    let mut output = Vec::new();
    io::copy(&mut decoder, &mut output)?;
    Ok(output)
}

fn zstd_level(level: CompressionLevel) -> i32 {
    match level {
        CompressionLevel::Fast => 1,
        CompressionLevel::Default => 3,
        CompressionLevel::Best => 19,
        CompressionLevel::Precise(value) => i32::from(value.get()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_round_trip() {
        let compressed = compress_to_vec(b"payload", CompressionLevel::Default).expect("compress");
        assert_eq!(&compressed[..4], b"\x28\xb5\x2f\xfd");
        assert_eq!(decompress_to_vec(&compressed).expect("decompress"), b"payload");
    }

    #[test]
    fn encoder_finishes_frame_on_drop() {
        let mut sink = Vec::new();
        {
            let mut encoder = encoder(&mut sink, CompressionLevel::Fast).expect("encoder");
            encoder.write_all(b"auto finished").expect("write");
        }
        assert_eq!(decompress_to_vec(&sink).expect("decode"), b"auto finished");
    }

    #[test]
    fn streaming_decoder_reads_frame() {
        let compressed = compress_to_vec(&b"frame".repeat(100), CompressionLevel::Best)
            .expect("compress");
        let mut output = Vec::new();
        decoder(&compressed[..])
            .expect("decoder")
            .read_to_end(&mut output)
            .expect("decode");
        assert_eq!(output, b"frame".repeat(100));
    }
}

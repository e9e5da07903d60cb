#![allow(clippy::module_name_repetitions)]

//! LZ4 frame adapters built on [`lz4_flex`].

use std::io::{self, Read, Write};

use crate::zlib::CompressionLevel;
use lz4_flex::frame::{
    AutoFinishEncoder, BlockMode, BlockSize, FrameDecoder, FrameEncoder, FrameInfo,
};

/// Wraps `reader` with an LZ4 frame decoder.
pub fn decoder<R: Read>(reader: R) -> FrameDecoder<R> {
    FrameDecoder::new(reader)
}

/// Wraps `writer` with an LZ4 frame encoder that finishes the frame on drop.
pub fn encoder<W: Write>(writer: W, level: CompressionLevel) -> AutoFinishEncoder<W> {
    FrameEncoder::with_frame_info(frame_info_for_level(level), writer).auto_finish()
}

/// Compresses `input` into a new [`Vec`].
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = FrameEncoder::with_frame_info(frame_info_for_level(level), Vec::new());
    encoder.write_all(input)?;
    encoder.finish().map_err(io::Error::other)
}

/// Decompresses `input` into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = decoder(input);
    let mut output = Vec::new();
    io::copy(&mut decoder, &mut output)?;
    Ok(output)
}

fn frame_info_for_level(level: CompressionLevel) -> FrameInfo {
    let block_size = match level {
        CompressionLevel::Fast => BlockSize::Max64KB,
        CompressionLevel::Default => BlockSize::Max256KB,
        CompressionLevel::Best => BlockSize::Max4MB,
        CompressionLevel::Precise(value) => match value.get() {
            1..=3 => BlockSize::Max64KB,
            4..=6 => BlockSize::Max256KB,
            7..=8 => BlockSize::Max1MB,
            _ => BlockSize::Max4MB,
        },
    };

    FrameInfo::new()
        .block_mode(BlockMode::Linked)
        .block_size(block_size)
        .content_checksum(true)
}

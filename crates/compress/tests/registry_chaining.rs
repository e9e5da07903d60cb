//! Integration tests for extension-driven codec selection.
//!
//! This test suite focuses on:
//! 1. Registering the optional codecs and resolving them by file name
//! 2. Multi-extension names mixing several real codecs
//! 3. Error surfacing for corrupt payloads behind a registered extension

use std::io::{Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use compress::zlib::{CompressionLevel, gzip_to_vec};
use compress::{BoxedReader, BoxedWriter, CompressionAlgorithm, ExtensionRegistry};

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn compress_with(registry: &ExtensionRegistry, name: &str, payload: &[u8]) -> Vec<u8> {
    let sink = SharedSink::default();
    {
        let boxed: BoxedWriter = Box::new(sink.clone());
        let mut writer = registry.wrap(name, boxed).unwrap();
        writer.write_all(payload).unwrap();
    }
    sink.bytes()
}

fn decompress_with(registry: &ExtensionRegistry, name: &str, bytes: Vec<u8>) -> Vec<u8> {
    let boxed: BoxedReader = Box::new(Cursor::new(bytes));
    let mut reader = registry.unwrap(name, boxed).unwrap();
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    out
}

// =============================================================================
// SECTION 1: Optional Codecs
// =============================================================================

#[test]
fn every_available_algorithm_round_trips_by_extension() {
    let registry = ExtensionRegistry::empty();
    for algorithm in CompressionAlgorithm::available() {
        assert!(registry.register_algorithm(*algorithm));
    }

    let payload = b"columnar,data,row\n".repeat(64);
    for algorithm in CompressionAlgorithm::available() {
        let name = format!("table.csv.{}", algorithm.extension());
        assert!(registry.can_unwrap(&name), "{name}");
        let compressed = compress_with(&registry, &name, &payload);
        assert_ne!(compressed, payload, "{algorithm} left payload untouched");
        assert_eq!(decompress_with(&registry, &name, compressed), payload);
    }
}

#[cfg(feature = "zstd")]
#[test]
fn zst_is_not_registered_by_default() {
    let registry = ExtensionRegistry::new();
    assert!(!registry.can_unwrap("dump.zst"));
    registry.register_algorithm(CompressionAlgorithm::Zstd);
    assert!(registry.can_unwrap("dump.zst"));
}

// =============================================================================
// SECTION 2: Mixed Codec Chains
// =============================================================================

#[cfg(feature = "lz4")]
#[test]
fn lz4_inside_gzip_round_trips() {
    let registry = ExtensionRegistry::new();
    registry.register_algorithm(CompressionAlgorithm::Lz4);

    let payload = b"nested frames".repeat(32);
    let compressed = compress_with(&registry, "blob.lz4.gz", &payload);
    assert_eq!(&compressed[..2], b"\x1f\x8b");
    assert_eq!(decompress_with(&registry, "blob.lz4.gz", compressed), payload);
}

#[test]
fn unknown_inner_segment_leaves_inner_layer_intact() {
    let registry = ExtensionRegistry::new();
    let inner = b"not really a tarball".to_vec();
    let outer = gzip_to_vec(&inner, CompressionLevel::Fast).unwrap();
    assert_eq!(decompress_with(&registry, "backup.tar.gz", outer), inner);
}

// =============================================================================
// SECTION 3: Error Surfacing
// =============================================================================

#[test]
fn corrupt_payload_fails_on_read() {
    let registry = ExtensionRegistry::new();
    let boxed: BoxedReader = Box::new(Cursor::new(b"definitely not gzip".to_vec()));
    let mut reader = registry.unwrap("data.gz", boxed).unwrap();
    let mut out = Vec::new();
    assert!(reader.read_to_end(&mut out).is_err());
}

#[test]
fn replaced_wrapper_is_returned_to_the_caller() {
    let registry = ExtensionRegistry::new();
    let previous = registry.register_input("gz", CompressionAlgorithm::Zlib);
    assert!(previous.is_some());

    let zlib = compress::zlib::compress_to_vec(b"swapped", CompressionLevel::Default).unwrap();
    assert_eq!(decompress_with(&registry, "x.gz", zlib), b"swapped");
}

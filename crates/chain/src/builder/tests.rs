use super::*;
use crate::source::{BytesSource, FnSource, StreamSource, StringSource};
use compress::BoxedReader;
use compress::zlib::{self, CompressionLevel};
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn utf8<S: Source>(source: S) -> InputBuilder<S> {
    InputBuilder::new(source)
        .with_registry(Arc::new(ExtensionRegistry::new()))
        .with_utf8()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    zlib::gzip_to_vec(data, CompressionLevel::Default).expect("gzip")
}

fn base64_standard(data: &[u8]) -> Vec<u8> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .encode(data)
        .into_bytes()
}

#[test]
fn setters_do_not_open_the_source() {
    let opens = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&opens);
    let builder = utf8(FnSource::new(move || -> io::Result<BoxedReader> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(io::empty()))
    }))
    .decompress()
    .decode_base64();

    assert_eq!(opens.load(Ordering::SeqCst), 0);
    let config = builder.config();
    assert!(config.decompress());
    assert_eq!(config.base64(), Some(Base64Variant::Standard));
    assert_eq!(config.charset(), Charset::utf8());
}

#[test]
fn every_terminal_call_opens_afresh() {
    let opens = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&opens);
    let builder = utf8(FnSource::new(move || -> io::Result<BoxedReader> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(Cursor::new(b"x\ny".to_vec())))
    }));

    assert_eq!(builder.read_all().expect("first"), "x\ny");
    assert_eq!(builder.read_lines().expect("second"), vec!["x", "y"]);
    assert_eq!(opens.load(Ordering::SeqCst), 2);
}

#[test]
fn open_failure_is_source_open() {
    let builder = utf8(
        FnSource::new(|| -> io::Result<BoxedReader> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        })
        .named("secret.txt"),
    );
    match builder.read_all() {
        Err(ChainError::SourceOpen { name, source }) => {
            assert_eq!(name, "secret.txt");
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn decompress_uses_registered_extension() {
    let source = BytesSource::new(gzip(b"hello\nworld")).named("greeting.txt.gz");
    assert_eq!(utf8(source).decompress().read_all().expect("read"), "hello\nworld");
}

#[test]
fn decompress_falls_back_to_zlib_without_name() {
    let compressed = zlib::compress_to_vec(b"fallback", CompressionLevel::Fast).expect("zlib");
    let source = BytesSource::new(compressed);
    assert_eq!(utf8(source).decompress().read_bytes().expect("read"), b"fallback");
}

#[test]
fn decompress_falls_back_to_zlib_for_unknown_extension() {
    let compressed = zlib::compress_to_vec(b"unknown", CompressionLevel::Fast).expect("zlib");
    let source = BytesSource::new(compressed).named("payload.bz2");
    assert_eq!(utf8(source).decompress().read_bytes().expect("read"), b"unknown");
}

#[test]
fn without_decompress_bytes_pass_through() {
    let compressed = gzip(b"raw");
    let source = BytesSource::new(compressed.clone()).named("raw.gz");
    assert_eq!(utf8(source).read_bytes().expect("read"), compressed);
}

#[test]
fn injected_registry_is_used() {
    let registry = Arc::new(ExtensionRegistry::empty());
    registry.register_input("rev", |reader: BoxedReader| -> io::Result<BoxedReader> {
        let mut bytes = Vec::new();
        let mut reader = reader;
        reader.read_to_end(&mut bytes)?;
        bytes.reverse();
        Ok(Box::new(Cursor::new(bytes)))
    });
    let builder = InputBuilder::new(BytesSource::new(b"olleh".to_vec()).named("x.rev"))
        .with_registry(Arc::clone(&registry))
        .with_utf8()
        .decompress();
    assert_eq!(builder.read_all().expect("read"), "hello");
    assert!(Arc::ptr_eq(builder.registry(), &registry));
}

#[test]
fn base64_is_applied_after_decompression() {
    let encoded = base64_standard(b"decoded text");
    let source = BytesSource::new(gzip(&encoded)).named("blob.b64.gz");
    let builder = utf8(source).decompress().decode_base64();
    assert_eq!(builder.read_all().expect("read"), "decoded text");
}

#[test]
fn mime_base64_variant() {
    let source = StringSource::new("aGVs\r\nbG8=\r\n");
    let builder = utf8(source).decode_base64_with(Base64Variant::Mime);
    assert_eq!(builder.read_bytes().expect("read"), b"hello");
}

#[test]
fn read_all_edge_cases() {
    assert_eq!(utf8(StringSource::new("")).read_all().expect("empty"), "");
    assert_eq!(utf8(StringSource::new("a\nb\nc")).read_all().expect("abc"), "a\nb\nc");
    assert_eq!(utf8(StringSource::new("a\r\nb\n")).read_all().expect("crlf"), "a\nb");
    assert_eq!(utf8(StringSource::new("\n")).read_all().expect("lf"), "");
    assert_eq!(utf8(StringSource::new("\n\n")).read_all().expect("lflf"), "\n");
}

#[test]
fn charset_label_configures_text_terminals() {
    let latin1 = Charset::for_label("latin1").expect("label");
    let builder = utf8(StringSource::encoded("déjà vu", latin1))
        .with_charset_label("ISO-8859-1")
        .expect("charset");
    assert_eq!(builder.read_all().expect("read"), "déjà vu");
    assert!(matches!(
        utf8(StringSource::new("x")).with_charset_label("nope"),
        Err(ChainError::UnsupportedCharset(_))
    ));
}

#[test]
fn stream_source_second_terminal_fails() {
    let builder = utf8(StreamSource::new(Cursor::new(b"once".to_vec())));
    assert_eq!(builder.read_all().expect("first"), "once");
    assert!(matches!(builder.read_all(), Err(ChainError::SourceOpen { .. })));
}

#[test]
fn stream_lines_is_lazy_and_closable() {
    let mut lines = utf8(StringSource::new("1\n2\n3")).stream_lines().expect("lines");
    assert_eq!(lines.next().expect("item").expect("line"), "1");
    lines.close();
    assert!(matches!(lines.next(), Some(Err(ChainError::LinesClosed))));
}

#[test]
fn objects_terminals() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Entry {
        id: u32,
    }

    let builder = utf8(StringSource::new("{\"id\":1} {\"id\":2}\n{\"id\":3}"));
    let entries: Vec<Entry> = builder.read_objects().expect("objects");
    assert_eq!(entries.len(), 3);
    assert_eq!(builder.read_object::<Entry>().expect("first"), Entry { id: 1 });

    let empty = utf8(StringSource::new(""));
    match empty.read_object::<Entry>() {
        Err(ChainError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("unexpected {other:?}"),
    }
    assert!(empty.read_objects::<Entry>().expect("none").is_empty());
}

#[test]
fn corrupt_compressed_objects_surface_as_io() {
    let source = BytesSource::new(b"\x1f\x8bgarbage".to_vec()).named("objects.json.gz");
    let result = utf8(source).decompress().read_objects::<serde_json::Value>();
    assert!(matches!(result, Err(ChainError::Io(_))), "{result:?}");
}

#[test]
fn read_document_requires_exactly_one_value() {
    let doc = utf8(StringSource::new("{\"a\": [1, 2]}\n"))
        .read_document()
        .expect("document");
    assert_eq!(doc["a"][1], 2);

    assert!(matches!(
        utf8(StringSource::new("{} {}")).read_document(),
        Err(ChainError::Deserialization(_))
    ));
}

#[test]
fn copy_to_leaves_sink_usable() {
    let mut sink = Vec::new();
    let copied = utf8(StringSource::new("abc"))
        .copy_to(&mut sink)
        .expect("copy");
    assert_eq!(copied, 3);
    sink.extend_from_slice(b"!");
    assert_eq!(sink, b"abc!");
}

#[test]
fn copy_text_to_counts_characters() {
    let latin1 = Charset::for_label("latin1").expect("label");
    let mut text = String::from(">");
    let copied = utf8(StringSource::encoded("naïve\r\n", latin1))
        .with_charset(latin1)
        .copy_text_to(&mut text)
        .expect("copy");
    assert_eq!(copied, 7);
    assert_eq!(text, ">naïve\r\n");
}

#[test]
fn copy_text_to_handles_large_multibyte_input() {
    let input = "日本語テキスト".repeat(4096);
    let mut text = String::new();
    let copied = utf8(StringSource::new(&input))
        .copy_text_to(&mut text)
        .expect("copy");
    assert_eq!(text, input);
    assert_eq!(copied, input.chars().count() as u64);
}

#[test]
fn as_reader_exposes_bufread() {
    use std::io::BufRead;

    let mut reader = utf8(StringSource::new("first\nsecond")).as_reader().expect("reader");
    let mut first = String::new();
    reader.read_line(&mut first).expect("line");
    assert_eq!(first, "first\n");
}

#[test]
fn as_stream_reports_label() {
    let pipeline = utf8(StringSource::new("x").named("x.txt"))
        .as_stream()
        .expect("stream");
    assert_eq!(pipeline.label(), "x.txt");
}

#[test]
fn builder_is_debuggable() {
    let rendered = format!("{:?}", utf8(BytesSource::new(b"".to_vec()).named("d.bin")));
    assert!(rendered.contains("d.bin"), "{rendered}");
}

#[test]
fn registry_lookups_happen_per_call() {
    let registry = Arc::new(ExtensionRegistry::empty());
    let builder = InputBuilder::new(BytesSource::new(gzip(b"late")).named("late.gz"))
        .with_registry(Arc::clone(&registry))
        .with_utf8()
        .decompress();

    // Before registration the zlib fallback rejects the gzip header.
    assert!(builder.read_bytes().is_err());
    registry.register_algorithm(CompressionAlgorithm::Gzip);
    assert_eq!(builder.read_bytes().expect("read"), b"late");
}

#[test]
fn stream_source_with_name_decompresses_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let builder = utf8(StreamSource::new(Cursor::new(gzip(b"payload"))).named("p.gz")).decompress();
    let mut lines = builder.stream_lines().expect("lines");
    for line in lines.by_ref() {
        seen.lock().expect("lock").push(line.expect("line"));
    }
    assert!(!lines.is_open());
    assert_eq!(*seen.lock().expect("lock"), vec!["payload".to_owned()]);
}

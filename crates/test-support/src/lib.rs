#![deny(unsafe_code)]

//! Shared fixtures for the streamchain test suites.
//!
//! [`RecordingSource`] observes how often a chain opens and releases its
//! source. The remaining helpers build compressed payloads and temporary
//! files.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chain::Source;
use compress::BoxedReader;
use compress::zlib::{self, CompressionLevel};
use tempfile::TempDir;

/// Counters shared between a [`RecordingSource`] and the readers it opens.
#[derive(Debug, Default)]
pub struct SourceStats {
    opens: AtomicUsize,
    closes: AtomicUsize,
    bytes: AtomicU64,
}

impl SourceStats {
    /// Number of successful opens.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Number of opened readers that have been dropped.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Raw bytes handed out across all readers.
    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::SeqCst)
    }

    /// Readers opened but not yet dropped.
    pub fn live(&self) -> usize {
        self.opens() - self.closes()
    }
}

/// In-memory source that records opens, closes and bytes read.
#[derive(Debug, Clone)]
pub struct RecordingSource {
    data: Arc<[u8]>,
    name: Option<String>,
    stats: Arc<SourceStats>,
}

impl RecordingSource {
    /// Creates an unnamed source over `data`.
    pub fn new(data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            data: data.into(),
            name: None,
            stats: Arc::new(SourceStats::default()),
        }
    }

    /// Attaches a name used for extension sniffing.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the shared counters.
    pub fn stats(&self) -> Arc<SourceStats> {
        Arc::clone(&self.stats)
    }
}

impl Source for RecordingSource {
    fn open(&self) -> io::Result<BoxedReader> {
        self.stats.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingReader {
            inner: Cursor::new(Arc::clone(&self.data)),
            stats: Arc::clone(&self.stats),
        }))
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.name.as_deref().map(Cow::Borrowed)
    }
}

struct RecordingReader {
    inner: Cursor<Arc<[u8]>>,
    stats: Arc<SourceStats>,
}

impl Read for RecordingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.stats.bytes.fetch_add(read as u64, Ordering::SeqCst);
        Ok(read)
    }
}

impl Drop for RecordingReader {
    fn drop(&mut self) {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Clonable writer whose contents can be inspected after the writer that
/// owned it has been dropped.
#[derive(Clone, Debug, Default)]
pub struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    /// Returns a copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Compresses `data` into a gzip member.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    zlib::gzip_to_vec(data, CompressionLevel::Default).expect("gzip fixture")
}

/// Compresses `data` into a zlib stream.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    zlib::compress_to_vec(data, CompressionLevel::Default).expect("zlib fixture")
}

/// Temporary directory holding fixture files.
#[derive(Debug)]
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture dir"),
        }
    }

    /// Writes `contents` to `name` inside the directory and returns its path.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Returns the path of `name` inside the directory without creating it.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_source_counts_opens_and_closes() {
        let source = RecordingSource::new(b"abc".to_vec()).named("abc.txt");
        let stats = source.stats();
        {
            let mut reader = source.open().expect("open");
            let mut out = Vec::new();
            reader.read_to_end(&mut out).expect("read");
            assert_eq!(stats.live(), 1);
        }
        assert_eq!(stats.opens(), 1);
        assert_eq!(stats.closes(), 1);
        assert_eq!(stats.bytes(), 3);
    }

    #[test]
    fn fixture_dir_writes_nested_files() {
        let fixtures = FixtureDir::new();
        let path = fixtures.write("nested.d/data.txt", b"x");
        assert_eq!(fs::read(path).expect("read"), b"x");
        assert!(!fixtures.path("missing").exists());
    }

    #[test]
    fn compression_fixtures_have_magic() {
        assert_eq!(&gzip(b"x")[..2], b"\x1f\x8b");
        assert_eq!(zlib(b"x")[0], 0x78);
    }
}

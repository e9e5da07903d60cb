//! crates/compress/src/registry.rs
//!
//! Extension-driven registry of stream wrappers.
//!
//! The registry maps file extensions (without the leading dot, compared
//! case-sensitively) to wrapper constructors, with independent tables for
//! the input (decompressing) and output (compressing) directions. A name such
//! as `backup.tar.gz` is peeled right to left: the `gz` wrapper is applied to
//! the raw stream first, then the `tar` wrapper on top of it. Peeling stops at
//! the first segment without a registered wrapper and the stream wrapped so
//! far is returned as-is.
//!
//! Both tables are [`DashMap`]s. Lookups clone the shared wrapper handle out
//! of the shard and release the shard lock before the wrapper runs, so
//! concurrent chain construction never holds a lock across wrapper I/O.

use std::fmt;
use std::io;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use logging::{trace_peel, trace_registry};

use crate::algorithm::CompressionAlgorithm;
use crate::wrapper::{
    BoxedReader, BoxedWriter, InputWrapper, OutputWrapper, SharedInputWrapper, SharedOutputWrapper,
};

/// Thread-safe table of extension-keyed stream wrappers.
///
/// # Example
///
/// ```
/// use compress::registry::ExtensionRegistry;
///
/// let registry = ExtensionRegistry::new();
/// assert!(registry.can_unwrap("report.csv.gz"));
/// assert!(!registry.can_unwrap("report.csv.bz2"));
/// ```
pub struct ExtensionRegistry {
    inputs: DashMap<String, SharedInputWrapper>,
    outputs: DashMap<String, SharedOutputWrapper>,
}

impl ExtensionRegistry {
    /// Creates a registry holding the built-in `gz` entry.
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_algorithm(CompressionAlgorithm::Gzip);
        registry
    }

    /// Creates a registry without any entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inputs: DashMap::new(),
            outputs: DashMap::new(),
        }
    }

    /// Returns the process-wide registry, creating it on first access.
    ///
    /// Chain builders use this instance unless another one is injected.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<ExtensionRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Registers both directions for `extension`.
    ///
    /// Returns `true` when neither direction previously had a wrapper for
    /// the extension, `false` when at least one was replaced.
    pub fn register<I, O>(&self, extension: impl Into<String>, input: I, output: O) -> bool
    where
        I: InputWrapper + 'static,
        O: OutputWrapper + 'static,
    {
        let extension = extension.into();
        let input_fresh = self.register_input(extension.clone(), input).is_none();
        let output_fresh = self.register_output(extension, output).is_none();
        input_fresh && output_fresh
    }

    /// Registers the input direction only, returning the replaced wrapper.
    pub fn register_input<I>(
        &self,
        extension: impl Into<String>,
        input: I,
    ) -> Option<SharedInputWrapper>
    where
        I: InputWrapper + 'static,
    {
        let extension = extension.into();
        let previous = self.inputs.insert(extension.clone(), Arc::new(input));
        trace_registry!(
            extension = extension.as_str(),
            replaced = previous.is_some(),
            "registered input wrapper"
        );
        previous
    }

    /// Registers the output direction only, returning the replaced wrapper.
    pub fn register_output<O>(
        &self,
        extension: impl Into<String>,
        output: O,
    ) -> Option<SharedOutputWrapper>
    where
        O: OutputWrapper + 'static,
    {
        let extension = extension.into();
        let previous = self.outputs.insert(extension.clone(), Arc::new(output));
        trace_registry!(
            extension = extension.as_str(),
            replaced = previous.is_some(),
            "registered output wrapper"
        );
        previous
    }

    /// Registers a built-in codec under its canonical extension.
    pub fn register_algorithm(&self, algorithm: CompressionAlgorithm) -> bool {
        self.register(algorithm.extension(), algorithm, algorithm)
    }

    /// Returns the input wrapper registered for `extension`.
    #[must_use]
    pub fn input_wrapper(&self, extension: &str) -> Option<SharedInputWrapper> {
        self.inputs.get(extension).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the output wrapper registered for `extension`.
    #[must_use]
    pub fn output_wrapper(&self, extension: &str) -> Option<SharedOutputWrapper> {
        self.outputs.get(extension).map(|entry| Arc::clone(entry.value()))
    }

    /// Reports whether the text after the last dot of `file_name` is a
    /// registered input extension.
    #[must_use]
    pub fn can_unwrap(&self, file_name: &str) -> bool {
        last_extension(file_name).is_some_and(|extension| self.inputs.contains_key(extension))
    }

    /// Reports whether the text after the last dot of `file_name` is a
    /// registered output extension.
    #[must_use]
    pub fn can_wrap(&self, file_name: &str) -> bool {
        last_extension(file_name).is_some_and(|extension| self.outputs.contains_key(extension))
    }

    /// Peels the extensions of `file_name` right to left, wrapping `input`
    /// with each registered input wrapper in turn.
    ///
    /// Returns `input` unchanged when the last extension is not registered.
    pub fn unwrap(&self, file_name: &str, input: BoxedReader) -> io::Result<BoxedReader> {
        let mut stream = input;
        for segment in extension_segments(file_name) {
            let Some(wrapper) = self.input_wrapper(segment) else {
                trace_peel!(segment, file_name, "no input wrapper, peeling stops");
                break;
            };
            stream = wrapper.wrap(stream)?;
            trace_peel!(segment, file_name, "applied input wrapper");
        }
        Ok(stream)
    }

    /// Peels the extensions of `file_name` right to left, wrapping `output`
    /// with each registered output wrapper in turn. The rightmost extension
    /// ends up closest to the underlying sink.
    pub fn wrap(&self, file_name: &str, output: BoxedWriter) -> io::Result<BoxedWriter> {
        let mut sink = output;
        for segment in extension_segments(file_name) {
            let Some(wrapper) = self.output_wrapper(segment) else {
                trace_peel!(segment, file_name, "no output wrapper, peeling stops");
                break;
            };
            sink = wrapper.wrap(sink)?;
            trace_peel!(segment, file_name, "applied output wrapper");
        }
        Ok(sink)
    }

    /// Returns the registered input extensions in sorted order.
    #[must_use]
    pub fn input_extensions(&self) -> Vec<String> {
        sorted_keys(&self.inputs)
    }

    /// Returns the registered output extensions in sorted order.
    #[must_use]
    pub fn output_extensions(&self) -> Vec<String> {
        sorted_keys(&self.outputs)
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("inputs", &self.input_extensions())
            .field("outputs", &self.output_extensions())
            .finish()
    }
}

fn sorted_keys<V>(map: &DashMap<String, V>) -> Vec<String> {
    let mut keys: Vec<String> = map.iter().map(|entry| entry.key().clone()).collect();
    keys.sort_unstable();
    keys
}

/// Returns the text after the last dot, if the name has one.
fn last_extension(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|dot| &file_name[dot + 1..])
}

/// Yields the dot-separated segments of `file_name` from right to left.
///
/// Only text following a dot is a segment, so the stem before the first dot
/// is never produced: `a.tar.gz` yields `gz` then `tar`.
fn extension_segments(file_name: &str) -> impl Iterator<Item = &str> {
    let mut end = file_name.len();
    std::iter::from_fn(move || {
        let dot = file_name[..end].rfind('.')?;
        let segment = &file_name[dot + 1..end];
        end = dot;
        Some(segment)
    })
}

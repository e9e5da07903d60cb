//! Snapshot of builder options.

use crate::base64::Base64Variant;
use crate::charset::Charset;

/// Options controlling how a chain is assembled.
///
/// Values are produced by [`InputBuilder`](crate::InputBuilder) setters and
/// read once per terminal call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    decompress: bool,
    base64: Option<Base64Variant>,
    charset: Charset,
}

impl ChainConfig {
    /// Creates a configuration with no decorators and the given charset.
    #[must_use]
    pub const fn new(charset: Charset) -> Self {
        Self {
            decompress: false,
            base64: None,
            charset,
        }
    }

    /// Whether the raw stream is decompressed.
    #[must_use]
    pub const fn decompress(&self) -> bool {
        self.decompress
    }

    /// The base64 layer, if any.
    #[must_use]
    pub const fn base64(&self) -> Option<Base64Variant> {
        self.base64
    }

    /// The charset used by text terminals.
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    pub(crate) const fn with_decompress(mut self) -> Self {
        self.decompress = true;
        self
    }

    pub(crate) const fn with_base64(mut self, variant: Base64Variant) -> Self {
        self.base64 = Some(variant);
        self
    }

    pub(crate) const fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

impl Default for ChainConfig {
    /// No decorators, platform default charset.
    fn default() -> Self {
        Self::new(Charset::platform_default())
    }
}

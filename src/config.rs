use crate::encoding::{Encoding, Encodings};

/// The uncompressed length of a Blob must be less than 32 MiB.
/// <https://wiki.openstreetmap.org/wiki/PBF_Format>
pub const MAX_UNCOMPRESSED_DATA_SIZE: usize = 32 * 1024 * 1024;

/// Limits and policy applied by [`Blob::resolve_with`](crate::Blob::resolve_with).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Upper bound for the uncompressed payload, whether or not `raw_size` is set.
    pub max_uncompressed_size: usize,
    /// Fail compressed blobs without `raw_size` instead of skipping size validation.
    pub require_raw_size: bool,
    /// Encodings the resolver is allowed to decode.
    pub accepted: Encodings,
}

impl Default for ResolveOptions {
    #[inline]
    fn default() -> Self {
        Self {
            max_uncompressed_size: MAX_UNCOMPRESSED_DATA_SIZE,
            require_raw_size: false,
            accepted: Encodings::all(),
        }
    }
}

impl ResolveOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_uncompressed_size(mut self, limit: usize) -> Self {
        self.max_uncompressed_size = limit;
        self
    }

    #[inline]
    pub fn require_raw_size(mut self, require: bool) -> Self {
        self.require_raw_size = require;
        self
    }

    #[inline]
    pub fn accepted(mut self, encodings: Encodings) -> Self {
        self.accepted = encodings;
        self
    }

    #[inline]
    pub fn accepts(&self, encoding: Encoding) -> bool {
        let flag = encoding.flag();
        !flag.is_empty() && self.accepted.contains(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ResolveOptions::default();
        assert_eq!(options.max_uncompressed_size, 32 * 1024 * 1024);
        assert!(!options.require_raw_size);
        assert!(options.accepts(Encoding::Zstd));
        assert!(!options.accepts(Encoding::Bzip2));
    }

    #[test]
    fn restrict_accepted() {
        let options = ResolveOptions::new().accepted(Encodings::RAW | Encodings::ZLIB);
        assert!(options.accepts(Encoding::Raw));
        assert!(options.accepts(Encoding::Zlib));
        assert!(!options.accepts(Encoding::Lzma));
    }
}

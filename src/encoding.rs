use std::fmt;

use bitflags::bitflags;

/// Which payload field of a `Blob` carries the data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Raw,
    Zlib,
    Lzma,
    Lz4,
    Zstd,
    /// `OBSOLETE_bzip2_data`. Never decoded.
    Bzip2,
}

bitflags! {
    /// A set of payload encodings.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Encodings: u32 {
        const RAW = 1;
        const ZLIB = 2;
        const LZMA = 4;
        const LZ4 = 8;
        const ZSTD = 16;
    }
}

impl Encoding {
    pub const ALL: [Encoding; 6] = [
        Self::Raw,
        Self::Zlib,
        Self::Lzma,
        Self::Lz4,
        Self::Zstd,
        Self::Bzip2,
    ];

    /// Name of the `Blob` field holding data in this encoding.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Zlib => "zlib_data",
            Self::Lzma => "lzma_data",
            Self::Lz4 => "lz4_data",
            Self::Zstd => "zstd_data",
            Self::Bzip2 => "OBSOLETE_bzip2_data",
        }
    }

    #[inline]
    pub const fn is_compressed(self) -> bool {
        !matches!(self, Self::Raw)
    }

    /// The flag of this encoding. Empty for bzip2, which is never accepted.
    pub const fn flag(self) -> Encodings {
        match self {
            Self::Raw => Encodings::RAW,
            Self::Zlib => Encodings::ZLIB,
            Self::Lzma => Encodings::LZMA,
            Self::Lz4 => Encodings::LZ4,
            Self::Zstd => Encodings::ZSTD,
            Self::Bzip2 => Encodings::empty(),
        }
    }

    /// Whether the codec for this encoding was compiled in.
    #[inline]
    pub fn is_available(self) -> bool {
        Encodings::available().contains(self.flag()) && !self.flag().is_empty()
    }
}

impl Encodings {
    /// Encodings whose codec is enabled through cargo features.
    pub fn available() -> Self {
        let mut set = Self::RAW;
        if cfg!(feature = "zlib") {
            set |= Self::ZLIB;
        }
        if cfg!(feature = "lzma") {
            set |= Self::LZMA;
        }
        if cfg!(feature = "lz4") {
            set |= Self::LZ4;
        }
        if cfg!(feature = "zstd") {
            set |= Self::ZSTD;
        }
        set
    }
}

impl fmt::Display for Encoding {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bzip2_is_never_available() {
        assert!(Encoding::Bzip2.flag().is_empty());
        assert!(!Encoding::Bzip2.is_available());
        assert!(Encoding::Raw.is_available());
    }

    #[test]
    fn flags_are_distinct() {
        let mut seen = Encodings::empty();
        for encoding in Encoding::ALL {
            assert!(!seen.intersects(encoding.flag()), "{encoding}");
            seen |= encoding.flag();
        }
        assert_eq!(seen, Encodings::all());
    }

    #[test]
    fn display_uses_field_name() {
        assert_eq!(Encoding::Zstd.to_string(), "zstd_data");
        assert_eq!(Encoding::Bzip2.to_string(), "OBSOLETE_bzip2_data");
    }
}

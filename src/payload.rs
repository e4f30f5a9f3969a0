use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::proto::Blob as PbfBlob;

/// The data of a `Blob`, tagged with its encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Raw(Vec<u8>),
    Zlib(Vec<u8>),
    Lzma(Vec<u8>),
    Lz4(Vec<u8>),
    Zstd(Vec<u8>),
    /// Obsolete bzip2 data. Kept so old files produce a clear error.
    Bzip2(Vec<u8>),
}

impl Payload {
    #[inline]
    pub fn new(encoding: Encoding, bytes: Vec<u8>) -> Self {
        match encoding {
            Encoding::Raw => Self::Raw(bytes),
            Encoding::Zlib => Self::Zlib(bytes),
            Encoding::Lzma => Self::Lzma(bytes),
            Encoding::Lz4 => Self::Lz4(bytes),
            Encoding::Zstd => Self::Zstd(bytes),
            Encoding::Bzip2 => Self::Bzip2(bytes),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Raw(_) => Encoding::Raw,
            Self::Zlib(_) => Encoding::Zlib,
            Self::Lzma(_) => Encoding::Lzma,
            Self::Lz4(_) => Encoding::Lz4,
            Self::Zstd(_) => Encoding::Zstd,
            Self::Bzip2(_) => Encoding::Bzip2,
        }
    }

    /// The stored bytes, compressed unless this is `Raw`.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Raw(bytes)
            | Self::Zlib(bytes)
            | Self::Lzma(bytes)
            | Self::Lz4(bytes)
            | Self::Zstd(bytes)
            | Self::Bzip2(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw(bytes)
            | Self::Zlib(bytes)
            | Self::Lzma(bytes)
            | Self::Lz4(bytes)
            | Self::Zstd(bytes)
            | Self::Bzip2(bytes) => bytes,
        }
    }

    /// Picks the single populated payload field out of `pbf`.
    ///
    /// Returns the payload and the untouched `raw_size`.
    pub(crate) fn take_from(pbf: PbfBlob) -> Result<(Self, Option<i32>)> {
        let PbfBlob {
            raw,
            raw_size,
            zlib_data,
            lzma_data,
            obsolete_bzip2_data,
            lz4_data,
            zstd_data,
        } = pbf;
        // `raw` counts when present, compressed fields only when non-empty
        let compressed = |bytes: Option<Vec<u8>>| bytes.filter(|b| !b.is_empty());
        let fields = [
            raw.map(Self::Raw),
            compressed(zlib_data).map(Self::Zlib),
            compressed(lzma_data).map(Self::Lzma),
            compressed(obsolete_bzip2_data).map(Self::Bzip2),
            compressed(lz4_data).map(Self::Lz4),
            compressed(zstd_data).map(Self::Zstd),
        ];
        let mut populated = fields.into_iter().flatten();
        let payload = populated.next().ok_or(Error::NoPayload)?;
        if let Some(other) = populated.next() {
            return Err(Error::AmbiguousPayload {
                first: payload.encoding(),
                second: other.encoding(),
            });
        }
        Ok((payload, raw_size))
    }

    /// Stores this payload in the matching field of `pbf`.
    pub(crate) fn put_into(self, pbf: &mut PbfBlob) {
        match self {
            Self::Raw(bytes) => pbf.raw = Some(bytes),
            Self::Zlib(bytes) => pbf.zlib_data = Some(bytes),
            Self::Lzma(bytes) => pbf.lzma_data = Some(bytes),
            Self::Lz4(bytes) => pbf.lz4_data = Some(bytes),
            Self::Zstd(bytes) => pbf.zstd_data = Some(bytes),
            Self::Bzip2(bytes) => pbf.obsolete_bzip2_data = Some(bytes),
        }
    }
}

use thiserror::Error;

use crate::encoding::Encoding;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    ProtobufError(#[from] prost::DecodeError),

    #[error("The Blob does not contain any payload")]
    NoPayload,

    #[error("The Blob contains more than one payload ({first} and {second})")]
    AmbiguousPayload { first: Encoding, second: Encoding },

    #[error("Size mismatch: expected {expected} uncompressed bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("The Blob uses the obsolete bzip2 encoding, which is not supported")]
    UnsupportedLegacyFormat,

    #[error("The encoding of the Blob is not supported: {0}")]
    UnsupportedEncoding(Encoding),

    #[error("Failed to decompress {encoding} data")]
    DecompressionFailure {
        encoding: Encoding,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compress {encoding} data")]
    CompressionFailure {
        encoding: Encoding,
        #[source]
        source: std::io::Error,
    },

    #[error("The compressed Blob does not declare its uncompressed size")]
    MissingRawSize,

    #[error("Invalid Format: negative `raw_size` {0}")]
    InvalidRawSize(i32),

    #[error("`raw_size` {0} does not fit into the `Blob` message")]
    RawSizeTooLarge(usize),

    // The uncompressed length of a Blob [..] must be less than 32 MiB.
    // https://wiki.openstreetmap.org/wiki/PBF_Format
    #[error("The uncompressed Blob exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    // The length of the BlobHeader [..] must be less than 64 KiB.
    // https://wiki.openstreetmap.org/wiki/PBF_Format
    #[error("Invalid Format: The size of the `BlobHeader` is to large")]
    BlobHeaderToLarge,

    #[error("Invalid Format: The size of the `Blob` is to large")]
    BlobDataToLarge,

    #[error("Invalid Format: negative `datasize` {0}")]
    InvalidDataSize(i32),

    #[error("The `BlobHeader` declares {declared} bytes, but the Blob has {actual}")]
    DataSizeMismatch { declared: usize, actual: usize },

    #[error("Unexpected Blob-Type {0}")]
    UnexpectedBlobType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Decoding of `Blob` payloads from the OpenStreetMap PBF format.
//!
//! A [`Blob`] carries exactly one [`Payload`], stored raw or compressed with
//! zlib, LZMA, LZ4 or Zstandard. [`Blob::resolve`] returns the uncompressed
//! bytes and checks them against the declared `raw_size`.

pub mod blob;
mod codec;
pub mod config;
pub mod encoding;
pub mod error;
pub mod header;
pub mod payload;
pub mod proto;

pub use blob::{resolve, Blob, PbfBlob, PbfMessage};
pub use config::{ResolveOptions, MAX_UNCOMPRESSED_DATA_SIZE};
pub use encoding::{Encoding, Encodings};
pub use error::{Error, Result};
pub use header::{BlobHeader, BlobType, PbfBlobHeader, MAX_HEADER_SIZE};
pub use payload::Payload;
pub use prost;

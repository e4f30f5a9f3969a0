//! Wire messages of `fileformat.proto`.
//!
//! The compressed-data fields are kept as independent optionals instead of a
//! `oneof`, so a blob carrying more than one of them can be detected and
//! rejected instead of being silently truncated to the last one decoded.

/// A chunk of (optionally compressed) payload data.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Blob {
    /// No compression.
    #[prost(bytes = "vec", optional, tag = "1")]
    pub raw: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    /// When compressed, the uncompressed size.
    #[prost(int32, optional, tag = "2")]
    pub raw_size: ::core::option::Option<i32>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub zlib_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub lzma_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    /// Formerly used for bzip2 compressed data. Deprecated in 2010.
    #[prost(bytes = "vec", optional, tag = "5")]
    pub obsolete_bzip2_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub lz4_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub zstd_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

/// Precedes every `Blob` in a PBF file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlobHeader {
    #[prost(string, required, tag = "1")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub indexdata: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    /// Size of the serialized `Blob` that follows.
    #[prost(int32, required, tag = "3")]
    pub datasize: i32,
}

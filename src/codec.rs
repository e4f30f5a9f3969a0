//! Per-encoding compression backends, each behind its cargo feature.

use std::io;
#[cfg(any(feature = "lzma", feature = "lz4", feature = "zstd"))]
use std::io::Read;
#[cfg(any(feature = "zlib", feature = "lzma", feature = "lz4"))]
use std::io::Write;

use crate::encoding::Encoding;
use crate::error::{Error, Result};

/// Magic bytes of an xz container.
#[cfg(feature = "lzma")]
const XZ_MAGIC: [u8; 6] = [0xFD, b'7', b'z', b'X', b'Z', 0x00];

/// Decompresses `data`, producing at most `limit + 1` bytes of output.
///
/// The caller detects an oversized payload from the returned length. Below
/// that cap the input must hold exactly one complete stream: truncated input
/// and bytes after the end of the stream are corrupt.
pub(crate) fn decompress(
    encoding: Encoding,
    data: &[u8],
    size_hint: usize,
    limit: usize,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(size_hint);
    let cap = limit.saturating_add(1);
    let result: io::Result<()> = match encoding {
        #[cfg(feature = "zlib")]
        Encoding::Zlib => zlib_decompress(data, cap, &mut bytes),
        #[cfg(feature = "lzma")]
        Encoding::Lzma => lzma_decompress(data, cap, &mut bytes),
        #[cfg(feature = "lz4")]
        Encoding::Lz4 => lz4_decompress(data, cap, &mut bytes),
        #[cfg(feature = "zstd")]
        Encoding::Zstd => zstd::stream::read::Decoder::with_buffer(data).and_then(|decoder| {
            decoder.take(cap as u64).read_to_end(&mut bytes)?;
            Ok(())
        }),
        _ => return Err(Error::UnsupportedEncoding(encoding)),
    };
    result.map_err(|source| Error::DecompressionFailure { encoding, source })?;
    bytes.truncate(cap);
    Ok(bytes)
}

#[inline]
fn corrupt(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

#[cfg(feature = "zlib")]
fn zlib_decompress(data: &[u8], cap: usize, bytes: &mut Vec<u8>) -> io::Result<()> {
    let mut inflate = flate2::Decompress::new(true);
    loop {
        if bytes.len() >= cap {
            return Ok(());
        }
        if bytes.len() == bytes.capacity() {
            bytes.reserve((cap - bytes.len()).min(64 * 1024));
        }
        let (total_in, total_out) = (inflate.total_in(), inflate.total_out());
        let status = inflate
            .decompress_vec(
                &data[total_in as usize..],
                bytes,
                flate2::FlushDecompress::None,
            )
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if status == flate2::Status::StreamEnd {
            break;
        }
        if inflate.total_in() == total_in && inflate.total_out() == total_out {
            return Err(corrupt("truncated zlib stream"));
        }
    }
    if (inflate.total_in() as usize) < data.len() {
        return Err(corrupt("trailing bytes after the end of the zlib stream"));
    }
    Ok(())
}

/// Accepts either an xz container or a bare LZMA2 stream.
#[cfg(feature = "lzma")]
fn lzma_decompress(data: &[u8], cap: usize, bytes: &mut Vec<u8>) -> io::Result<()> {
    if data.starts_with(&XZ_MAGIC) {
        let mut decoder = xz2::bufread::XzDecoder::new(data);
        (&mut decoder).take(cap as u64).read_to_end(bytes)?;
        if bytes.len() < cap && (decoder.total_in() as usize) < data.len() {
            return Err(corrupt("trailing bytes after the end of the xz stream"));
        }
        return Ok(());
    }

    let mut input = data;
    let mut output = CappedWriter { bytes, cap };
    lzma_rs::lzma2_decompress(&mut input, &mut output)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if output.bytes.len() < cap && !input.is_empty() {
        return Err(corrupt("trailing bytes after the end of the LZMA2 stream"));
    }
    Ok(())
}

/// Keeps the first `cap` bytes written and discards the rest.
#[cfg(feature = "lzma")]
struct CappedWriter<'a> {
    bytes: &'a mut Vec<u8>,
    cap: usize,
}

#[cfg(feature = "lzma")]
impl Write for CappedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.cap.saturating_sub(self.bytes.len());
        self.bytes.extend_from_slice(&buf[..buf.len().min(room)]);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "lz4")]
fn lz4_decompress(data: &[u8], cap: usize, bytes: &mut Vec<u8>) -> io::Result<()> {
    let mut decoder = lz4::Decoder::new(data)?;
    (&mut decoder).take(cap as u64).read_to_end(bytes)?;
    if bytes.len() >= cap {
        return Ok(());
    }
    // the decoder reports a clean end of input even inside a frame
    let (rest, result) = decoder.finish();
    result.map_err(|_| corrupt("truncated lz4 frame"))?;
    if !rest.is_empty() {
        return Err(corrupt("trailing bytes after the end of the lz4 frame"));
    }
    Ok(())
}

pub(crate) fn compress(encoding: Encoding, data: &[u8]) -> Result<Vec<u8>> {
    let result: io::Result<Vec<u8>> = match encoding {
        #[cfg(feature = "zlib")]
        Encoding::Zlib => zlib_compress(data),
        #[cfg(feature = "lzma")]
        Encoding::Lzma => lzma_compress(data),
        #[cfg(feature = "lz4")]
        Encoding::Lz4 => lz4_compress(data),
        #[cfg(feature = "zstd")]
        Encoding::Zstd => zstd::stream::encode_all(data, 0),
        _ => return Err(Error::UnsupportedEncoding(encoding)),
    };
    result.map_err(|source| Error::CompressionFailure { encoding, source })
}

#[cfg(feature = "zlib")]
fn zlib_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2),
        flate2::Compression::default(),
    );
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(feature = "lzma")]
fn lzma_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::with_capacity(data.len() / 2), 6);
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(feature = "lz4")]
fn lz4_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = lz4::EncoderBuilder::new().build(Vec::with_capacity(data.len() / 2))?;
    encoder.write_all(data)?;
    let (bytes, result) = encoder.finish();
    result?;
    Ok(bytes)
}

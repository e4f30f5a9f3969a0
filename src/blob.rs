use std::borrow::Cow;

use prost::bytes::Buf;
use prost::Message;

use crate::codec;
use crate::config::ResolveOptions;
use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::payload::Payload;
pub use crate::proto::Blob as PbfBlob;

/// A validated type backed by a protobuf message.
pub trait PbfMessage: Sized {
    type Message: Message + Default;

    fn from_message(pbf: Self::Message) -> Result<Self>;

    fn into_message(self) -> Self::Message;

    fn decode(buf: impl Buf) -> Result<Self> {
        let msg = Self::Message::decode(buf)?;
        Self::from_message(msg)
    }

    #[inline]
    fn encode_to_vec(self) -> Vec<u8> {
        self.into_message().encode_to_vec()
    }
}

/// A `Blob` with exactly one payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    payload: Payload,
    raw_size: Option<usize>,
}

impl Blob {
    /// Fails if `raw_size` cannot be stored in the `int32` wire field.
    pub fn new(payload: Payload, raw_size: Option<usize>) -> Result<Self> {
        match raw_size {
            Some(size) if i32::try_from(size).is_err() => Err(Error::RawSizeTooLarge(size)),
            _ => Ok(Self { payload, raw_size }),
        }
    }

    /// An uncompressed blob.
    #[inline]
    pub fn raw(bytes: Vec<u8>) -> Result<Self> {
        let raw_size = bytes.len();
        Self::new(Payload::Raw(bytes), Some(raw_size))
    }

    /// Encodes `data` with `encoding` and records its length as `raw_size`.
    pub fn compress(data: &[u8], encoding: Encoding) -> Result<Self> {
        let payload = match encoding {
            Encoding::Raw => Payload::Raw(data.to_vec()),
            Encoding::Bzip2 => return Err(Error::UnsupportedLegacyFormat),
            _ => Payload::new(encoding, codec::compress(encoding, data)?),
        };
        log::trace!(
            "compressed {} bytes into {} bytes of {encoding}",
            data.len(),
            payload.as_bytes().len()
        );
        Self::new(payload, Some(data.len()))
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.payload.encoding()
    }

    #[inline]
    pub fn raw_size(&self) -> Option<usize> {
        self.raw_size
    }

    /// Returns the uncompressed payload, using the default [`ResolveOptions`].
    #[inline]
    pub fn resolve(&self) -> Result<Cow<'_, [u8]>> {
        self.resolve_with(&ResolveOptions::default())
    }

    /// Returns the uncompressed payload.
    ///
    /// Raw payloads are borrowed. The result is checked against `raw_size`
    /// when it is present; see [`ResolveOptions::require_raw_size`] for blobs
    /// that omit it.
    pub fn resolve_with(&self, options: &ResolveOptions) -> Result<Cow<'_, [u8]>> {
        let encoding = self.encoding();
        if encoding == Encoding::Bzip2 {
            log::debug!("rejecting blob with {encoding}");
            return Err(Error::UnsupportedLegacyFormat);
        }
        if !options.accepts(encoding) {
            log::debug!("rejecting blob with {encoding}: not accepted");
            return Err(Error::UnsupportedEncoding(encoding));
        }

        let limit = options.max_uncompressed_size;
        match self.raw_size {
            Some(raw_size) if raw_size > limit => return Err(Error::PayloadTooLarge { limit }),
            None if encoding.is_compressed() && options.require_raw_size => {
                return Err(Error::MissingRawSize);
            }
            _ => {}
        }

        let bytes = match &self.payload {
            Payload::Raw(bytes) => Cow::Borrowed(bytes.as_slice()),
            payload => {
                let size_hint = self.raw_size.unwrap_or(payload.as_bytes().len()).min(limit);
                Cow::Owned(codec::decompress(
                    encoding,
                    payload.as_bytes(),
                    size_hint,
                    limit,
                )?)
            }
        };
        if bytes.len() > limit {
            return Err(Error::PayloadTooLarge { limit });
        }

        match self.raw_size {
            Some(expected) if expected != bytes.len() => {
                return Err(Error::SizeMismatch {
                    expected,
                    actual: bytes.len(),
                });
            }
            Some(_) => {}
            None if encoding.is_compressed() => {
                log::debug!(
                    "{encoding} blob has no raw_size, skipping size validation of {} bytes",
                    bytes.len()
                );
            }
            None => {}
        }

        log::trace!(
            "resolved {encoding} blob: {} -> {} bytes",
            self.payload.as_bytes().len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

impl PbfMessage for Blob {
    type Message = PbfBlob;

    fn from_message(pbf: PbfBlob) -> Result<Self> {
        let (payload, raw_size) = Payload::take_from(pbf)?;
        let raw_size = match raw_size {
            Some(size) => Some(usize::try_from(size).map_err(|_| Error::InvalidRawSize(size))?),
            None => None,
        };
        Self::new(payload, raw_size)
    }

    fn into_message(self) -> PbfBlob {
        let mut pbf = PbfBlob {
            // bounded by `Blob::new`
            raw_size: self.raw_size.map(|size| size as i32),
            ..Default::default()
        };
        self.payload.put_into(&mut pbf);
        pbf
    }
}

impl TryFrom<PbfBlob> for Blob {
    type Error = Error;

    #[inline]
    fn try_from(pbf: PbfBlob) -> Result<Self> {
        Self::from_message(pbf)
    }
}

/// Resolves the payload of a decoded `Blob` message with the default options.
pub fn resolve(pbf: PbfBlob) -> Result<Vec<u8>> {
    let blob = Blob::from_message(pbf)?;
    let bytes = blob.resolve()?.into_owned();
    Ok(bytes)
}

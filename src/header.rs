use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use prost::bytes::Buf;
use prost::Message;

use crate::blob::{Blob, PbfMessage};
use crate::config::MAX_UNCOMPRESSED_DATA_SIZE;
use crate::error::{Error, Result};
pub use crate::proto::BlobHeader as PbfBlobHeader;

/// The length of the serialized `BlobHeader` must be less than 64 KiB.
pub const MAX_HEADER_SIZE: usize = 64 * 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlobType {
    OSMHeader,
    OSMData,
}

impl BlobType {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OSMHeader => "OSMHeader",
            Self::OSMData => "OSMData",
        }
    }
}

impl FromStr for BlobType {
    type Err = ();
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "OSMHeader" => Self::OSMHeader,
            "OSMData" => Self::OSMData,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for BlobType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the `Blob` that follows it.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobHeader {
    pbf: PbfBlobHeader,
}

impl BlobHeader {
    pub fn new(blob_type: impl Into<String>, datasize: usize) -> Result<Self> {
        if datasize > MAX_UNCOMPRESSED_DATA_SIZE {
            return Err(Error::BlobDataToLarge);
        }
        Ok(Self {
            pbf: PbfBlobHeader {
                r#type: blob_type.into(),
                indexdata: None,
                // bounded by MAX_UNCOMPRESSED_DATA_SIZE above
                datasize: datasize as i32,
            },
        })
    }

    /// Header for `blob`, with `datasize` set to its serialized length.
    pub fn for_blob(blob_type: BlobType, blob: &Blob) -> Result<Self> {
        let datasize = blob.clone().into_message().encoded_len();
        Self::new(blob_type.as_str(), datasize)
    }

    /// The known type of the blob, `None` for unknown type strings.
    #[inline]
    pub fn blob_type(&self) -> Option<BlobType> {
        self.pbf.r#type.parse().ok()
    }

    pub fn expect_type(&self, expected: BlobType) -> Result<()> {
        if self.blob_type() == Some(expected) {
            Ok(())
        } else {
            Err(Error::UnexpectedBlobType(self.pbf.r#type.clone()))
        }
    }

    #[inline]
    pub fn datasize(&self) -> usize {
        self.pbf.datasize as usize
    }

    #[inline]
    pub fn indexdata(&self) -> &[u8] {
        self.pbf.indexdata.as_deref().unwrap_or_default()
    }

    /// Decodes the serialized `Blob` this header describes.
    pub fn decode_blob(&self, bytes: &[u8]) -> Result<Blob> {
        if bytes.len() != self.datasize() {
            return Err(Error::DataSizeMismatch {
                declared: self.datasize(),
                actual: bytes.len(),
            });
        }
        Blob::decode(bytes)
    }
}

impl Deref for BlobHeader {
    type Target = PbfBlobHeader;
    #[inline]
    fn deref(&self) -> &PbfBlobHeader {
        &self.pbf
    }
}

impl PbfMessage for BlobHeader {
    type Message = PbfBlobHeader;

    fn from_message(pbf: PbfBlobHeader) -> Result<Self> {
        let datasize = usize::try_from(pbf.datasize)
            .map_err(|_| Error::InvalidDataSize(pbf.datasize))?;
        if datasize > MAX_UNCOMPRESSED_DATA_SIZE {
            return Err(Error::BlobDataToLarge);
        }
        Ok(Self { pbf })
    }

    #[inline]
    fn into_message(self) -> PbfBlobHeader {
        self.pbf
    }

    fn decode(buf: impl Buf) -> Result<Self> {
        if buf.remaining() > MAX_HEADER_SIZE {
            return Err(Error::BlobHeaderToLarge);
        }
        let msg = PbfBlobHeader::decode(buf)?;
        Self::from_message(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;

    #[test]
    fn parse_blob_type() {
        assert_eq!("OSMHeader".parse::<BlobType>(), Ok(BlobType::OSMHeader));
        assert_eq!("OSMData".parse::<BlobType>(), Ok(BlobType::OSMData));
        assert_eq!("OSMIndex".parse::<BlobType>(), Err(()));
        assert_eq!(BlobType::OSMData.to_string(), "OSMData");
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let header = BlobHeader::new("OSMIndex", 12).unwrap();
        assert_eq!(header.blob_type(), None);
        assert!(matches!(
            header.expect_type(BlobType::OSMData),
            Err(Error::UnexpectedBlobType(t)) if t == "OSMIndex"
        ));
    }

    #[test]
    fn header_round_trip() {
        let header = BlobHeader::new("OSMData", 1234).unwrap();
        let bytes = header.clone().encode_to_vec();
        let decoded = BlobHeader::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.datasize(), 1234);
        assert!(decoded.indexdata().is_empty());
        assert!(decoded.expect_type(BlobType::OSMData).is_ok());
    }

    #[test]
    fn header_too_large() {
        let bytes = vec![0u8; MAX_HEADER_SIZE + 1];
        assert!(matches!(
            BlobHeader::decode(bytes.as_slice()),
            Err(Error::BlobHeaderToLarge)
        ));
    }

    #[test]
    fn truncated_header() {
        assert!(matches!(
            BlobHeader::decode(&[0xFFu8][..]),
            Err(Error::ProtobufError(_))
        ));
    }

    #[test]
    fn datasize_limits() {
        let negative = PbfBlobHeader {
            r#type: "OSMData".to_owned(),
            indexdata: None,
            datasize: -3,
        };
        assert!(matches!(
            BlobHeader::from_message(negative),
            Err(Error::InvalidDataSize(-3))
        ));
        assert!(matches!(
            BlobHeader::new("OSMData", MAX_UNCOMPRESSED_DATA_SIZE + 1),
            Err(Error::BlobDataToLarge)
        ));
    }

    #[test]
    fn decode_blob_checks_datasize() {
        let blob = Blob::compress(b"hello", Encoding::Raw).unwrap();
        let header = BlobHeader::for_blob(BlobType::OSMHeader, &blob).unwrap();
        let bytes = blob.clone().encode_to_vec();
        assert_eq!(header.datasize(), bytes.len());

        let decoded = header.decode_blob(&bytes).unwrap();
        assert_eq!(decoded, blob);

        let mut longer = bytes.clone();
        longer.push(0);
        assert!(matches!(
            header.decode_blob(&longer),
            Err(Error::DataSizeMismatch { declared, actual }) if actual == declared + 1
        ));
    }
}

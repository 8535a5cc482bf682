//! TLV (tag-length-value) codec
//!
//! Every OATH request and response payload is a flat sequence of records:
//! a single tag octet, a BER-style length (short form below 0x80, long form
//! `0x80 | n` followed by n length octets), and the value. Tags carry no
//! class/constructed semantics here; the applet treats them as plain octets,
//! which is why a generic BER parser would mis-read tags like 0x76 as
//! constructed.

use bytes::{BufMut, Bytes, BytesMut};

/// Errors raised while decoding a TLV stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TlvError {
    /// The buffer ended inside a length field
    #[error("truncated TLV length")]
    TruncatedLength,

    /// A declared length exceeds the remaining buffer
    #[error("TLV value truncated: declared {declared} octets, {remaining} remain")]
    TruncatedValue {
        /// Declared value length
        declared: usize,
        /// Octets remaining in the buffer
        remaining: usize,
    },

    /// Indefinite lengths (0x80) are not used by the applet
    #[error("indefinite TLV length")]
    IndefiniteLength,

    /// A long-form length wider than four octets
    #[error("TLV length field of {0} octets")]
    LengthTooWide(usize),
}

/// A single decoded record borrowing from the response buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    /// Tag octet
    pub tag: u8,
    /// Value octets
    pub value: &'a [u8],
}

/// Append one encoded record to `buf`
pub fn encode_into(buf: &mut BytesMut, tag: u8, value: &[u8]) {
    buf.put_u8(tag);
    encode_length(buf, value.len());
    buf.put_slice(value);
}

/// Encode one record
pub fn encode(tag: u8, value: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(2 + value.len());
    encode_into(&mut buf, tag, value);
    buf.freeze()
}

fn encode_length(buf: &mut BytesMut, length: usize) {
    if length < 0x80 {
        buf.put_u8(length as u8);
    } else if length < 0x100 {
        buf.put_u8(0x81);
        buf.put_u8(length as u8);
    } else {
        buf.put_u8(0x82);
        buf.put_u16(length as u16);
    }
}

/// Decode a buffer as a lazy sequence of records
///
/// The iterator scans strictly sequentially and never reads past the declared
/// length of the current record, so concatenated heterogeneous streams decode
/// without knowing how many records follow. Decoding errors surface as an
/// `Err` item and end the iteration.
pub const fn parse(buffer: &[u8]) -> Tlvs<'_> {
    Tlvs { buffer }
}

/// Iterator over the records of a TLV stream
#[derive(Debug, Clone)]
pub struct Tlvs<'a> {
    buffer: &'a [u8],
}

impl<'a> Iterator for Tlvs<'a> {
    type Item = Result<Tlv<'a>, TlvError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&tag, rest) = self.buffer.split_first()?;

        let (length, rest) = match decode_length(rest) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.buffer = &[];
                return Some(Err(e));
            }
        };

        if length > rest.len() {
            let remaining = rest.len();
            self.buffer = &[];
            return Some(Err(TlvError::TruncatedValue {
                declared: length,
                remaining,
            }));
        }

        let (value, rest) = rest.split_at(length);
        self.buffer = rest;
        Some(Ok(Tlv { tag, value }))
    }
}

fn decode_length(buffer: &[u8]) -> Result<(usize, &[u8]), TlvError> {
    let (&first, rest) = buffer.split_first().ok_or(TlvError::TruncatedLength)?;

    if first < 0x80 {
        return Ok((first as usize, rest));
    }

    let width = (first & 0x7F) as usize;
    if width == 0 {
        return Err(TlvError::IndefiniteLength);
    }
    if width > 4 {
        return Err(TlvError::LengthTooWide(width));
    }
    if rest.len() < width {
        return Err(TlvError::TruncatedLength);
    }

    let (octets, rest) = rest.split_at(width);
    let length = octets.iter().fold(0usize, |acc, &o| (acc << 8) | o as usize);
    Ok((length, rest))
}

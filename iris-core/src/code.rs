use crate::error::Error;
use bitvec::prelude::{BitSlice, BitVec, Lsb0};
use std::{fmt, str::FromStr};

pub type IrisCodeBits = BitVec<u8, Lsb0>;

/// A fixed-length binary iris template.
///
/// Codes are immutable once produced. The length is a deployment constant
/// chosen by the encoder configuration; a code is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IrisCode {
    bits: IrisCodeBits,
}

impl IrisCode {
    pub fn from_bits(bits: IrisCodeBits) -> Result<Self, Error> {
        if bits.is_empty() {
            return Err(Error::InvalidCodeError("code is empty".to_owned()));
        }
        Ok(Self { bits })
    }

    /// Only for the encoder, which guarantees a non-empty bit vector.
    pub(crate) fn from_bits_unchecked(bits: IrisCodeBits) -> Self {
        debug_assert!(!bits.is_empty());
        Self { bits }
    }

    /// Rebuilds a code from the packed form produced by [`IrisCode::to_bytes`].
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self, Error> {
        if bytes.len() != len.div_ceil(8) {
            return Err(Error::InvalidCodeError(format!(
                "{} bytes cannot hold exactly {} bits",
                bytes.len(),
                len
            )));
        }
        let mut bits = IrisCodeBits::from_slice(bytes);
        bits.truncate(len);
        Self::from_bits(bits)
    }

    /// Packs the code into bytes, least significant bit first. Unused bits of
    /// the last byte are zero so equal codes always pack to equal bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bits = self.bits.clone();
        bits.set_uninitialized(false);
        bits.into_vec()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// `None` if `index` is past the end of the code.
    pub fn get_bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    pub fn bits(&self) -> &BitSlice<u8, Lsb0> {
        self.bits.as_bitslice()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of positions in which the two codes differ.
    pub fn count_differences(&self, other: &Self) -> Result<usize, Error> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let mut diff = self.bits.clone();
        diff ^= other.bits.as_bitslice();
        Ok(diff.count_ones())
    }
}

impl fmt::Display for IrisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            match bit {
                true => f.write_str("1")?,
                false => f.write_str("0")?,
            }
        }
        Ok(())
    }
}

impl FromStr for IrisCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = IrisCodeBits::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => {
                    return Err(Error::InvalidCodeError(format!(
                        "unexpected character {c:?} at position {i}"
                    )))
                }
            }
        }
        Self::from_bits(bits)
    }
}

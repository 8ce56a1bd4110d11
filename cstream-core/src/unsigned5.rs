// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! UNSIGNED5: the byte-oriented variable-length integer format of compressed
//! debug-info streams.
//!
//! A value is written as up to [`MAX_LENGTH`] bytes. Byte values below `X` are
//! excluded from the encoding (so a zero byte can terminate a stream), the
//! next `L` values are "low codes" that end an encoding, and the remaining
//! `H = 1 << lg_H` values are "high codes" that ask for another byte. Each byte
//! contributes `(b - X) << (lg_H * i)`. The fifth byte always ends the value.
//!
//! ```text
//!   value |  HOTSPOT bytes (X=1, L=191, lg_H=6)
//!  -------+-------------------------------------
//!       0 | 01
//!     190 | bf
//!     191 | c0 01
//!     508 | fd 05
//! ```

use crate::buffer::{ByteSource, Reader};
use crate::decoder::IntegerDecoder;
use crate::error::Error;
use crate::util::{decode_sign, reverse_int};
use tracing::{debug, trace};

/// Upper bound on the bytes of a single encoded value.
pub const MAX_LENGTH: usize = 5;

/// The radix parameters of an UNSIGNED5 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawUnsigned5"))]
pub struct Unsigned5 {
    x: u32,
    l: u32,
    lg_h: u32,
}

impl Unsigned5 {
    /// Current layout: one excluded byte value (zero).
    pub const HOTSPOT: Unsigned5 = Unsigned5 {
        x: 1,
        l: 191,
        lg_h: 6,
    };

    /// Layout of older compressed streams, with no excluded bytes.
    pub const LEGACY: Unsigned5 = Unsigned5 {
        x: 0,
        l: 192,
        lg_h: 6,
    };

    pub fn new(x: u32, l: u32, lg_h: u32) -> Result<Unsigned5, Error> {
        if l == 0 {
            return Err(Error::invalid_parameters("L must be at least 1"));
        }
        if x.checked_add(l).map_or(true, |end| end > 256) {
            return Err(Error::invalid_parameters(format!(
                "X + L must not exceed 256, got X={x} L={l}"
            )));
        }
        // Shifts reach lg_h * (MAX_LENGTH - 1) and must stay inside a u32.
        if !(1..=7).contains(&lg_h) {
            return Err(Error::invalid_parameters(format!(
                "lg_H must be in 1..=7, got {lg_h}"
            )));
        }
        Ok(Unsigned5 { x, l, lg_h })
    }

    #[inline(always)]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline(always)]
    pub fn l(&self) -> u32 {
        self.l
    }

    #[inline(always)]
    pub fn lg_h(&self) -> u32 {
        self.lg_h
    }

    #[inline(always)]
    pub fn h(&self) -> u32 {
        1 << self.lg_h
    }

    /// Decodes one value starting at `position`.
    ///
    /// Returns the value and the position just past its last consumed byte.
    /// An excluded byte in a continuation slot ends the value early: the partial
    /// sum is returned and the position is left on the offending byte. Only reads
    /// outside `bf` fail.
    pub fn decode<S: ByteSource + ?Sized>(
        &self,
        bf: &S,
        position: usize,
    ) -> Result<(u32, usize), Error> {
        let (x, l) = (self.x, self.l);
        let b0 = bf.byte_at(position)? as u32;
        let mut sum = b0.wrapping_sub(x);
        if b0 < x + l {
            if b0 < x {
                debug!(position, byte = b0, "excluded UNSIGNED5 lead byte");
            }
            return Ok((sum, position + 1));
        }
        let mut i = 1;
        let mut lg_h_i = 0;
        loop {
            let b_i = bf.byte_at(position + i)? as u32;
            if b_i < x {
                debug!(
                    position,
                    offset = position + i,
                    byte = b_i,
                    "excluded UNSIGNED5 continuation byte, returning partial value"
                );
                return Ok((sum, position + i));
            }
            lg_h_i += self.lg_h;
            sum = sum.wrapping_add((b_i - x) << lg_h_i);
            if b_i < x + l || i == MAX_LENGTH - 1 {
                return Ok((sum, position + i + 1));
            }
            i += 1;
        }
    }
}

impl Default for Unsigned5 {
    fn default() -> Self {
        Unsigned5::HOTSPOT
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUnsigned5 {
    x: u32,
    l: u32,
    lg_h: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUnsigned5> for Unsigned5 {
    type Error = Error;

    fn try_from(raw: RawUnsigned5) -> Result<Self, Self::Error> {
        Unsigned5::new(raw.x, raw.l, raw.lg_h)
    }
}

/// Typed reads over an UNSIGNED5 stream.
///
/// Every read advances the cursor past the bytes it consumed. A failed read
/// leaves the cursor untouched.
#[derive(Debug, Clone, Copy)]
pub struct CompressedReader<S> {
    reader: Reader<S>,
    params: Unsigned5,
}

impl<S: ByteSource> CompressedReader<S> {
    pub fn new(bf: S, position: usize) -> CompressedReader<S> {
        Self::with_params(bf, position, Unsigned5::HOTSPOT)
    }

    pub fn with_params(bf: S, position: usize, params: Unsigned5) -> CompressedReader<S> {
        CompressedReader {
            reader: Reader::with_cursor(bf, position),
            params,
        }
    }

    #[inline(always)]
    pub fn params(&self) -> &Unsigned5 {
        &self.params
    }

    #[inline(always)]
    pub fn reader(&self) -> &Reader<S> {
        &self.reader
    }

    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.reader.get_cursor()
    }

    #[inline(always)]
    pub fn set_cursor(&mut self, cursor: usize) {
        trace!(from = self.reader.cursor, to = cursor, "reposition compressed stream");
        self.reader.set_cursor(cursor);
    }

    #[inline(always)]
    pub fn skip(&mut self, len: usize) {
        self.reader.skip(len);
    }

    #[inline(always)]
    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let (value, next) = self.params.decode(&self.reader.bf, self.reader.cursor)?;
        self.reader.cursor = next;
        Ok(value)
    }

    #[inline(always)]
    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        Ok(decode_sign(self.read_varuint32()?))
    }

    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(self.read_varint32()? as i16)
    }

    #[inline(always)]
    pub fn read_char16(&mut self) -> Result<u16, Error> {
        Ok(self.read_varuint32()? as u16)
    }

    #[inline(always)]
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_bits(reverse_int(self.read_varuint32()?)))
    }

    /// High word first, each word bit-reversed on its own.
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let restore = self.reader.reset_cursor_to_here();
        let rh = reverse_int(self.read_varuint32()?) as u64;
        let rl = match self.read_varuint32() {
            Ok(v) => reverse_int(v) as u64,
            Err(e) => {
                restore(&mut self.reader);
                return Err(e);
            }
        };
        Ok(f64::from_bits((rh << 32) | (rl & 0xFFFF_FFFF)))
    }

    /// Low word first, unlike [`read_f64`](Self::read_f64).
    pub fn read_i64(&mut self) -> Result<i64, Error> {
        let restore = self.reader.reset_cursor_to_here();
        let low = self.read_varint32()?;
        let high = match self.read_varint32() {
            Ok(v) => v,
            Err(e) => {
                restore(&mut self.reader);
                return Err(e);
            }
        };
        Ok(((high as i64) << 32) | (low as i64 & 0xFFFF_FFFF))
    }
}

impl<S: ByteSource> IntegerDecoder for CompressedReader<S> {
    #[inline(always)]
    fn read_varuint32(&mut self) -> Result<u32, Error> {
        CompressedReader::read_varuint32(self)
    }

    #[inline(always)]
    fn get_cursor(&self) -> usize {
        CompressedReader::get_cursor(self)
    }

    #[inline(always)]
    fn set_cursor(&mut self, cursor: usize) {
        CompressedReader::set_cursor(self, cursor)
    }
}

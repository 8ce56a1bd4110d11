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

//! Bit-packed "sparse data" streams.
//!
//! Sparse streams favor runs of zeros: a zero costs a single `0` bit. Any other
//! value is a `1` marker followed by payload bytes that need not be byte
//! aligned. Two generations of the layout exist and are not interchangeable:
//!
//! * [`SparseDataReader`] (current): the marker is the top bit of the first
//!   payload byte. The first byte carries 6 payload bits and a `0x40`
//!   continuation flag, later bytes carry 7 bits and a `0x80` flag.
//!
//!   ```text
//!         value | byte0    | byte1    | byte2
//!   ------------+----------+----------+----------
//!             0 | 0
//!             1 | 10000001
//!            63 | 10111111
//!            64 | 11000000 | 00000001
//!          8191 | 11111111 | 01111111
//!          8192 | 11000000 | 10000000 | 00000001
//!   ```
//!
//! * [`LegacySparseReader`]: the marker is a bit of its own, followed by
//!   payload bytes that each carry 6 bits. The first byte continues on
//!   `0x40`, later bytes on `0x80`.
//!
//! Neither layout carries a length, so each reader stops once it has read
//! enough payload bytes to fill a `u32` ([`MAX_LENGTH`] for the current
//! layout, [`LEGACY_MAX_LENGTH`] for the legacy one) and returns what it has.

use crate::buffer::ByteSource;
use crate::decoder::IntegerDecoder;
use crate::error::Error;
use tracing::{debug, trace};

/// Upper bound on the payload bytes of a single value.
pub const MAX_LENGTH: usize = 5;

/// Upper bound on the payload bytes of a single legacy value: six 6-bit groups
/// cover 32 bits.
pub const LEGACY_MAX_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct SparseDataReader<S> {
    bf: S,
    cursor: usize,
    bit_pos: u8,
}

impl<S: ByteSource> SparseDataReader<S> {
    pub fn new(bf: S, position: usize) -> SparseDataReader<S> {
        SparseDataReader {
            bf,
            cursor: position,
            bit_pos: 0,
        }
    }

    #[inline(always)]
    pub fn source(&self) -> &S {
        &self.bf
    }

    /// Byte holding the next unread bit.
    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    /// Moves to the start of byte `cursor`, dropping any sub-byte offset.
    pub fn set_cursor(&mut self, cursor: usize) {
        trace!(from = self.cursor, to = cursor, "reposition sparse stream");
        self.cursor = cursor;
        self.bit_pos = 0;
    }

    /// Next unread bit inside the current byte, counted from the most
    /// significant bit.
    #[inline(always)]
    pub fn bit_pos(&self) -> u8 {
        self.bit_pos
    }

    /// Absolute number of bits before the read position.
    #[inline(always)]
    pub fn bit_offset(&self) -> usize {
        self.cursor * 8 + self.bit_pos as usize
    }

    /// Tests the zero marker. A `0` bit is consumed and means the value is zero.
    /// A `1` bit is left in place: it is the top bit of the first payload byte.
    pub fn read_zero(&mut self) -> Result<bool, Error> {
        let b = self.bf.byte_at(self.cursor)?;
        if b & (0x80 >> self.bit_pos) != 0 {
            return Ok(false);
        }
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.cursor += 1;
            self.bit_pos = 0;
        }
        Ok(true)
    }

    /// Reads the next 8 bits, which may straddle two bytes.
    pub fn read_raw_byte(&mut self) -> Result<u8, Error> {
        if self.bit_pos == 0 {
            let b = self.bf.byte_at(self.cursor)?;
            self.cursor += 1;
            return Ok(b);
        }
        let b1 = self.bf.byte_at(self.cursor)? << self.bit_pos;
        let b2 = self.bf.byte_at(self.cursor + 1)? >> (8 - self.bit_pos);
        self.cursor += 1;
        Ok(b1 | b2)
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let (cursor, bit_pos) = (self.cursor, self.bit_pos);
        match self.read_varuint32_impl() {
            Ok(v) => Ok(v),
            Err(e) => {
                self.cursor = cursor;
                self.bit_pos = bit_pos;
                Err(e)
            }
        }
    }

    fn read_varuint32_impl(&mut self) -> Result<u32, Error> {
        if self.read_zero()? {
            return Ok(0);
        }
        let mut b = self.read_raw_byte()?;
        let mut result = (b & 0x3F) as u32;
        let mut i = 0;
        while (if i == 0 { b & 0x40 } else { b & 0x80 }) != 0 {
            if i + 1 >= MAX_LENGTH {
                debug!(
                    cursor = self.cursor,
                    max_length = MAX_LENGTH,
                    "sparse value exceeds length cap, truncating"
                );
                break;
            }
            b = self.read_raw_byte()?;
            result |= ((b & 0x7F) as u32) << (6 + 7 * i);
            i += 1;
        }
        Ok(result)
    }
}

impl<S: ByteSource> IntegerDecoder for SparseDataReader<S> {
    #[inline(always)]
    fn read_varuint32(&mut self) -> Result<u32, Error> {
        SparseDataReader::read_varuint32(self)
    }

    #[inline(always)]
    fn get_cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    fn set_cursor(&mut self, cursor: usize) {
        SparseDataReader::set_cursor(self, cursor)
    }
}

/// Reader for the older sparse layout, which caches the byte it is consuming.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySparseReader<S> {
    bf: S,
    cursor: usize,
    curr_byte: u8,
    // Bits of `curr_byte` already consumed; 0 when it is used up.
    byte_pos: u8,
}

impl<S: ByteSource> LegacySparseReader<S> {
    pub fn new(bf: S, position: usize) -> LegacySparseReader<S> {
        LegacySparseReader {
            bf,
            cursor: position,
            curr_byte: 0,
            byte_pos: 0,
        }
    }

    #[inline(always)]
    pub fn source(&self) -> &S {
        &self.bf
    }

    /// Next byte to be fetched. While a cached byte is partially consumed this
    /// is one past the byte holding the next unread bit.
    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        trace!(from = self.cursor, to = cursor, "reposition legacy sparse stream");
        self.cursor = cursor;
        self.curr_byte = 0;
        self.byte_pos = 0;
    }

    #[inline(always)]
    pub fn bit_pos(&self) -> u8 {
        self.byte_pos
    }

    #[inline(always)]
    pub fn bit_offset(&self) -> usize {
        if self.byte_pos == 0 {
            self.cursor * 8
        } else {
            (self.cursor - 1) * 8 + self.byte_pos as usize
        }
    }

    /// Consumes the marker bit and returns `true` when it is `0`.
    pub fn read_zero(&mut self) -> Result<bool, Error> {
        if self.byte_pos == 0 {
            self.curr_byte = self.bf.byte_at(self.cursor)?;
            self.cursor += 1;
        }
        let bit = self.curr_byte & (0x80 >> self.byte_pos);
        self.byte_pos = (self.byte_pos + 1) % 8;
        Ok(bit == 0)
    }

    /// Reads the next 8 bits: the unread tail of the cached byte joined with the
    /// head of the following one.
    pub fn read_raw_byte(&mut self) -> Result<u8, Error> {
        let next = self.bf.byte_at(self.cursor)?;
        let b = if self.byte_pos == 0 {
            next
        } else {
            (self.curr_byte << self.byte_pos) | (next >> (8 - self.byte_pos))
        };
        self.curr_byte = next;
        self.cursor += 1;
        Ok(b)
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let (cursor, curr_byte, byte_pos) = (self.cursor, self.curr_byte, self.byte_pos);
        match self.read_varuint32_impl() {
            Ok(v) => Ok(v),
            Err(e) => {
                self.cursor = cursor;
                self.curr_byte = curr_byte;
                self.byte_pos = byte_pos;
                Err(e)
            }
        }
    }

    fn read_varuint32_impl(&mut self) -> Result<u32, Error> {
        if self.read_zero()? {
            return Ok(0);
        }
        let mut b = self.read_raw_byte()?;
        let mut result = (b & 0x3F) as u32;
        let mut i = 0;
        while (if i == 0 { b & 0x40 } else { b & 0x80 }) != 0 {
            if i + 1 >= LEGACY_MAX_LENGTH {
                debug!(
                    cursor = self.cursor,
                    max_length = LEGACY_MAX_LENGTH,
                    "legacy sparse value exceeds length cap, truncating"
                );
                break;
            }
            b = self.read_raw_byte()?;
            i += 1;
            result |= ((b & 0x3F) as u32) << (6 * i);
        }
        Ok(result)
    }
}

impl<S: ByteSource> IntegerDecoder for LegacySparseReader<S> {
    #[inline(always)]
    fn read_varuint32(&mut self) -> Result<u32, Error> {
        LegacySparseReader::read_varuint32(self)
    }

    #[inline(always)]
    fn get_cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    fn set_cursor(&mut self, cursor: usize) {
        LegacySparseReader::set_cursor(self, cursor)
    }
}

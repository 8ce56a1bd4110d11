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

//! Byte-addressable sources and the byte cursor shared by every decoder.
//!
//! # Reader Invariants
//!
//! 1. **Borrowed source**: a cursor never owns or mutates the bytes it decodes;
//!    the owner of the buffer (a mapped debug section, a copied code blob, ...)
//!    decides its provenance and lifetime.
//! 2. **Lazy bounds checking**: `set_cursor` and `skip` accept any offset. Only
//!    the next read validates it, through [`ByteSource::byte_at`].
//! 3. **Failed reads do not move**: a read that hits `Error::BufferOutOfBound`
//!    leaves the cursor where it was.
//! 4. **Explicit byte order**: multi-byte values are assembled from single
//!    bytes with shifts, so the host endianness never matters.

use crate::error::Error;
use std::sync::Arc;

/// Read-only, randomly addressable bytes.
pub trait ByteSource {
    /// Returns the byte at the absolute `index`.
    fn byte_at(&self, index: usize) -> Result<u8, Error>;

    /// Number of addressable bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for [u8] {
    #[inline(always)]
    fn byte_at(&self, index: usize) -> Result<u8, Error> {
        match self.get(index) {
            None => Err(Error::buffer_out_of_bound(index, 1, <[u8]>::len(self))),
            Some(v) => Ok(*v),
        }
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl ByteSource for Vec<u8> {
    #[inline(always)]
    fn byte_at(&self, index: usize) -> Result<u8, Error> {
        self.as_slice().byte_at(index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl ByteSource for Box<[u8]> {
    #[inline(always)]
    fn byte_at(&self, index: usize) -> Result<u8, Error> {
        (**self).byte_at(index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl ByteSource for Arc<[u8]> {
    #[inline(always)]
    fn byte_at(&self, index: usize) -> Result<u8, Error> {
        (**self).byte_at(index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    #[inline(always)]
    fn byte_at(&self, index: usize) -> Result<u8, Error> {
        (**self).byte_at(index)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        (**self).len()
    }
}

/// A movable read position over a [`ByteSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reader<S> {
    pub(crate) bf: S,
    pub(crate) cursor: usize,
}

impl<S: ByteSource> Reader<S> {
    #[inline(always)]
    pub fn new(bf: S) -> Reader<S> {
        Reader { bf, cursor: 0 }
    }

    #[inline(always)]
    pub fn with_cursor(bf: S, cursor: usize) -> Reader<S> {
        Reader { bf, cursor }
    }

    #[inline(always)]
    pub fn source(&self) -> &S {
        &self.bf
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    /// Bytes left between the cursor and the end of the source.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bf.len().saturating_sub(self.cursor)
    }

    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    #[inline(always)]
    pub fn skip(&mut self, len: usize) {
        self.cursor = self.cursor.saturating_add(len);
    }

    /// Reads the byte at an absolute index without moving the cursor.
    #[inline(always)]
    pub fn peek_u8(&self, index: usize) -> Result<u8, Error> {
        self.bf.byte_at(index)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let result = self.bf.byte_at(self.cursor)?;
        self.cursor += 1;
        Ok(result)
    }

    #[inline(always)]
    pub fn reset_cursor_to_here(&self) -> impl FnOnce(&mut Self) {
        let raw_cursor = self.cursor;
        move |this: &mut Self| {
            this.cursor = raw_cursor;
        }
    }
}

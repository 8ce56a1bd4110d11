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

//! # cstream core
//!
//! Decoders for the compressed streams a native compiler backend writes into
//! its debug information: scope descriptions, object values and oop maps are
//! all stored as runs of variable-length integers in a raw byte buffer.
//!
//! ## Architecture
//!
//! - **`buffer`**: the [`ByteSource`](buffer::ByteSource) abstraction over the
//!   backing bytes and the byte [`Reader`](buffer::Reader) cursor
//! - **`unsigned5`**: the byte-oriented UNSIGNED5 format and
//!   [`CompressedReader`](unsigned5::CompressedReader) with typed reads
//! - **`sparse`**: the two generations of bit-packed sparse data streams
//! - **`decoder`**: the [`IntegerDecoder`](decoder::IntegerDecoder) capability
//!   all readers implement
//! - **`error`**: error handling and result types
//! - **`util`**: sign and bit-reversal helpers
//!
//! ## Key Concepts
//!
//! Streams carry no length prefix. Every encoded value is self-delimiting and
//! every decoder bounds the bytes one value may consume, so a corrupt buffer
//! yields a wrong value rather than a runaway read. Only reads past the end of
//! the source fail.
//!
//! Readers own their cursor and borrow the bytes: several readers, on several
//! threads, may decode one shared buffer at once.
//!
//! ## Usage
//!
//! ```rust
//! use cstream_core::unsigned5::CompressedReader;
//!
//! // 190, then -1 (zig-zag 1), then 1.0f32 (bit-reversed 0x1fc)
//! let bytes = [0xBFu8, 0x02, 0xFD, 0x05];
//! let mut reader = CompressedReader::new(&bytes[..], 0);
//! assert_eq!(reader.read_varuint32().unwrap(), 190);
//! assert_eq!(reader.read_varint32().unwrap(), -1);
//! assert_eq!(reader.read_f32().unwrap(), 1.0);
//! assert_eq!(reader.get_cursor(), 4);
//! ```

pub mod buffer;
pub mod decoder;
pub mod error;
pub mod sparse;
pub mod unsigned5;
pub mod util;

pub use buffer::{ByteSource, Reader};
pub use decoder::IntegerDecoder;
pub use error::Error;
pub use sparse::{LegacySparseReader, SparseDataReader};
pub use unsigned5::{CompressedReader, Unsigned5};

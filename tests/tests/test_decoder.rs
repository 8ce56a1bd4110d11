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

//! Tests for the decoder capability shared by all stream readers

use cstream_core::{
    ByteSource, CompressedReader, IntegerDecoder, LegacySparseReader, SparseDataReader,
    Unsigned5,
};
use cstream_tests::{LegacySparseWriter, SparseWriter, Unsigned5Writer};
use std::sync::Arc;
use std::thread;

fn read_flags<D: IntegerDecoder>(decoder: &mut D, n: usize) -> Vec<bool> {
    (0..n).map(|_| decoder.read_bool().unwrap()).collect()
}

#[test]
fn test_same_values_through_every_decoder() {
    let values = [0u32, 5, 0, 0, 300, 1];
    let expected: Vec<bool> = values.iter().map(|&v| v != 0).collect();

    let mut u5 = Unsigned5Writer::new(Unsigned5::HOTSPOT);
    let mut sparse = SparseWriter::default();
    let mut legacy = LegacySparseWriter::default();
    for v in values {
        u5.write_varuint32(v);
        sparse.write_varuint32(v);
        legacy.write_varuint32(v);
    }
    let (u5, sparse, legacy) = (u5.dump(), sparse.finish(), legacy.finish());

    let mut decoders: Vec<Box<dyn IntegerDecoder + '_>> = vec![
        Box::new(CompressedReader::new(&u5[..], 0)),
        Box::new(SparseDataReader::new(&sparse[..], 0)),
        Box::new(LegacySparseReader::new(&legacy[..], 0)),
    ];
    for decoder in decoders.iter_mut() {
        let flags: Vec<bool> = (0..values.len())
            .map(|_| decoder.read_bool().unwrap())
            .collect();
        assert_eq!(flags, expected);
    }

    let mut reader = CompressedReader::new(&u5[..], 0);
    assert_eq!(read_flags(&mut reader, values.len()), expected);
}

#[test]
fn test_cursor_restart_through_trait() {
    let mut writer = Unsigned5Writer::new(Unsigned5::HOTSPOT);
    writer.write_varuint32(11);
    writer.write_varuint32(500);
    let buf = writer.dump();

    let mut reader = CompressedReader::new(&buf, 0);
    let first = IntegerDecoder::read_varuint32(&mut reader).unwrap();
    let after_first = IntegerDecoder::get_cursor(&reader);
    IntegerDecoder::skip(&mut reader, 0);
    assert_eq!(IntegerDecoder::read_varuint32(&mut reader).unwrap(), 500);
    IntegerDecoder::set_cursor(&mut reader, 0);
    assert_eq!(IntegerDecoder::read_varuint32(&mut reader).unwrap(), first);
    assert_eq!(IntegerDecoder::get_cursor(&reader), after_first);
}

#[test]
fn test_copied_cursor_is_independent() {
    let buf = [0x02u8, 0x03, 0x04];
    let mut a = CompressedReader::new(&buf[..], 0);
    a.read_varuint32().unwrap();
    let mut b = a;
    assert_eq!(b.read_varuint32().unwrap(), 2);
    assert_eq!(a.get_cursor(), 1);
    assert_eq!(a.read_varuint32().unwrap(), 2);
}

#[test]
fn test_cursors_share_a_buffer_across_threads() {
    let mut writer = Unsigned5Writer::new(Unsigned5::HOTSPOT);
    for i in 0..1000u32 {
        writer.write_varuint32(i * 7919);
    }
    let buf: Arc<[u8]> = Arc::from(writer.dump());
    assert_eq!(ByteSource::len(&buf), writer.len());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                let mut reader = CompressedReader::new(buf, 0);
                let mut sum = 0u64;
                for _ in 0..1000 {
                    sum += reader.read_varuint32().unwrap() as u64;
                }
                sum
            })
        })
        .collect();

    let expected: u64 = (0..1000u64).map(|i| i * 7919).sum();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_skip_from_far_cursor_fails_on_next_read() {
    let buf = [0x81u8];
    let mut decoders: Vec<Box<dyn IntegerDecoder + '_>> = vec![
        Box::new(CompressedReader::new(&buf[..], 0)),
        Box::new(SparseDataReader::new(&buf[..], 0)),
        Box::new(LegacySparseReader::new(&buf[..], 0)),
    ];
    for decoder in decoders.iter_mut() {
        decoder.set_cursor(usize::MAX - 1);
        decoder.skip(5);
        assert_eq!(decoder.get_cursor(), usize::MAX);
        assert!(decoder.read_varuint32().is_err());
    }
}

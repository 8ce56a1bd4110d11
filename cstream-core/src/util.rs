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

/// Maps a zig-zag encoded value back to its signed form, so that small
/// magnitudes of either sign stay short on the wire.
#[inline(always)]
pub fn decode_sign(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Inverse of [`decode_sign`].
#[inline(always)]
pub fn encode_sign(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Full bit reversal of a 32-bit word.
///
/// Float payloads are stored reversed: their trailing zero mantissa bits
/// become leading zeros and the UNSIGNED5 encoding gets shorter.
#[inline(always)]
pub fn reverse_int(value: u32) -> u32 {
    value.reverse_bits()
}

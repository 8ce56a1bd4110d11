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

use std::borrow::Cow;

use thiserror::Error;

/// Errors raised while decoding a compressed stream.
///
/// Malformed encodings are not errors: the decoders return a best-effort
/// value instead. Only reads outside the backing source and invalid codec
/// parameters fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    #[error("Invalid codec parameters: {0}")]
    InvalidParameters(Cow<'static, str>),
}

impl Error {
    #[inline]
    #[cold]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        Error::BufferOutOfBound(offset, length, capacity)
    }

    #[inline]
    #[cold]
    pub fn invalid_parameters<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::InvalidParameters(s.into())
    }
}

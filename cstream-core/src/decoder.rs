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

use crate::error::Error;

/// The capability shared by every stream decoder: an integer read that
/// advances a cursor, plus the thin wrappers built on it.
///
/// Each decoder keeps its own cursor state; implementations share nothing
/// beyond this contract.
pub trait IntegerDecoder {
    fn read_varuint32(&mut self) -> Result<u32, Error>;

    fn get_cursor(&self) -> usize;

    fn set_cursor(&mut self, cursor: usize);

    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_varuint32()? != 0)
    }

    #[inline(always)]
    fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_varuint32()? as i8)
    }

    #[inline(always)]
    fn skip(&mut self, len: usize) {
        let cursor = self.get_cursor();
        self.set_cursor(cursor.saturating_add(len));
    }
}

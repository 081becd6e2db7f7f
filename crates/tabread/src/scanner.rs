// Dweve Tabread - Tabular data file reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Chunked byte cursor with line-end normalization.
//!
//! The scanner refills a fixed-size buffer from any [`Read`] and hands out one
//! event per byte. `\n`, `\r` and `\r\n` all produce exactly one
//! [`ScanEvent::LineEnd`], also when the `\r` and `\n` land in different chunks.
//!
//! ```rust
//! use tabread::{ByteScanner, ScanEvent};
//! use std::io::Cursor;
//!
//! let mut scanner = ByteScanner::new(Cursor::new("a\r\nb"), 2);
//! assert_eq!(scanner.next_event().unwrap(), ScanEvent::Byte(b'a'));
//! assert_eq!(scanner.next_event().unwrap(), ScanEvent::LineEnd);
//! assert_eq!(scanner.next_event().unwrap(), ScanEvent::Byte(b'b'));
//! assert_eq!(scanner.line(), 2);
//! assert_eq!(scanner.next_event().unwrap(), ScanEvent::Eof);
//! ```

use std::io::{self, ErrorKind, Read};

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// One step of the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// A content byte (never `\r` or `\n`).
    Byte(u8),
    /// End of a physical line.
    LineEnd,
    /// The source is exhausted.
    Eof,
}

/// Byte cursor over a reader with one byte of lookback.
pub struct ByteScanner<R: Read> {
    reader: R,
    buffer: Box<[u8]>,
    pos: usize,
    len: usize,
    current: u8,
    previous: u8,
    /// Last event was a `\r`; a directly following `\n` is swallowed.
    after_cr: bool,
    /// A line end was emitted; the line counter advances on the next event.
    line_pending: bool,
    line: usize,
    eof: bool,
}

impl<R: Read> ByteScanner<R> {
    /// Create a scanner reading `capacity` bytes per refill.
    pub fn new(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            len: 0,
            current: LF,
            previous: LF,
            after_cr: false,
            line_pending: false,
            line: 1,
            eof: false,
        }
    }

    /// Physical line (1-based) of the most recent event.
    ///
    /// While handling a [`ScanEvent::LineEnd`] this is the line that just ended.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The byte most recently handed out (`\n` after a line end).
    #[inline]
    pub fn current(&self) -> u8 {
        self.current
    }

    /// The byte before [`current`](Self::current). Line starts report `\n`.
    #[inline]
    pub fn previous(&self) -> u8 {
        self.previous
    }

    /// Advance and return the next event.
    pub fn next_event(&mut self) -> io::Result<ScanEvent> {
        loop {
            if self.pos == self.len && !self.fill()? {
                return Ok(ScanEvent::Eof);
            }

            let byte = self.buffer[self.pos];
            self.pos += 1;

            if self.after_cr {
                self.after_cr = false;
                if byte == LF {
                    continue;
                }
            }

            if self.line_pending {
                self.line_pending = false;
                self.line += 1;
            }

            self.previous = self.current;
            return Ok(match byte {
                LF | CR => {
                    self.after_cr = byte == CR;
                    self.line_pending = true;
                    self.current = LF;
                    ScanEvent::LineEnd
                }
                _ => {
                    self.current = byte;
                    ScanEvent::Byte(byte)
                }
            });
        }
    }

    /// Discard bytes up to (not including) the next line terminator.
    ///
    /// The following [`next_event`](Self::next_event) returns the line end, or
    /// [`ScanEvent::Eof`] if the source ends first.
    pub fn skip_line(&mut self) -> io::Result<()> {
        loop {
            if self.pos == self.len && !self.fill()? {
                return Ok(());
            }

            let stop = memchr::memchr2(LF, CR, &self.buffer[self.pos..self.len]);
            let end = match stop {
                Some(offset) => self.pos + offset,
                None => self.len,
            };

            if end > self.pos {
                self.previous = if end - self.pos >= 2 {
                    self.buffer[end - 2]
                } else {
                    self.current
                };
                self.current = self.buffer[end - 1];
                self.after_cr = false;
            }
            self.pos = end;

            if stop.is_some() {
                return Ok(());
            }
        }
    }

    /// Refill the buffer. Returns false at end of input.
    fn fill(&mut self) -> io::Result<bool> {
        if self.eof {
            return Ok(false);
        }
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(false);
                }
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

//! Output sinks for encoded MIDI bytes.
//!
//! `midiwire` is `no_std`, so encoding goes through its own minimal `Write` trait instead of
//! `std::io::Write`.
//! It is implemented for byte slices, `Cursor`, `Vec<u8>` (with the `alloc` feature) and any
//! `std::io::Write` through `IoWrap` (with the `std` feature).

use crate::prelude::*;

/// The result of writing to a sink `W`.
pub type WriteResult<W> = StdResult<(), <W as Write>::Error>;

/// A sink for encoded MIDI bytes.
pub trait Write {
    /// The error produced when the sink cannot take any more bytes.
    type Error;
    /// Write all of the given bytes, or fail.
    fn write(&mut self, buf: &[u8]) -> WriteResult<Self>;
}

/// Writing to a byte slice advances the slice past the written bytes.
impl<'a> Write for &'a mut [u8] {
    type Error = CursorError;
    fn write(&mut self, buf: &[u8]) -> WriteResult<Self> {
        if buf.len() > self.len() {
            let len = self.len();
            self.copy_from_slice(&buf[..len]);
            *self = &mut [];
            Err(CursorError::OutOfSpace)
        } else {
            self[..buf.len()].copy_from_slice(buf);
            let slice = core::mem::replace(self, &mut []);
            *self = &mut slice[buf.len()..];
            Ok(())
        }
    }
}

#[cfg(feature = "alloc")]
impl Write for Vec<u8> {
    type Error = &'static str;
    #[inline]
    fn write(&mut self, buf: &[u8]) -> WriteResult<Self> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// A fixed buffer that keeps track of how many bytes have been written into it.
///
/// Any complete MIDI message this crate produces fits in 3 bytes.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    cur: usize,
}
impl<'a> Cursor<'a> {
    /// Start writing at the beginning of `buf`.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Cursor<'a> {
        Cursor { buf, cur: 0 }
    }
    /// The bytes written so far.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.cur]
    }
    /// The amount of bytes written so far.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cur
    }
}
impl<'a> Write for Cursor<'a> {
    type Error = CursorError;
    fn write(&mut self, buf: &[u8]) -> WriteResult<Self> {
        //Cannot overflow because `cur <= buf.len()` is always true.
        let up_to = self.cur + buf.len();
        if up_to > self.buf.len() {
            let space = self.buf.len() - self.cur;
            self.buf[self.cur..].copy_from_slice(&buf[..space]);
            self.cur = self.buf.len();
            Err(CursorError::OutOfSpace)
        } else {
            self.buf[self.cur..up_to].copy_from_slice(buf);
            self.cur = up_to;
            Ok(())
        }
    }
}

/// The error produced when a fixed buffer runs out of space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorError {
    /// The buffer filled up before the whole message could be written.
    /// Whatever fit was still written.
    OutOfSpace,
}
impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CursorError::OutOfSpace => write!(f, "out of buffer space"),
        }
    }
}

/// Adapts a `std::io::Write` into a MIDI byte sink.
pub struct IoWrap<T>(pub T);
#[cfg(feature = "std")]
impl<T: io::Write> Write for IoWrap<T> {
    type Error = io::Error;
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        io::Write::write_all(&mut self.0, buf)
    }
}

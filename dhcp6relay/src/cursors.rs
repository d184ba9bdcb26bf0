use bytes::Buf;

use crate::{PktBuf, PktBufMut};

/// A read-only cursor over a byte slice.
///
/// The cursor keeps the whole slice and a `[start, end)` window into it, so a
/// packet view can advance past its header and later be rewound.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor {
            buf,
            start: 0,
            end: buf.len(),
        }
    }

    /// The full underlying slice, up to the current end of the window.
    #[inline]
    pub fn buf(&self) -> &'a [u8] {
        &self.buf[..self.end]
    }

    /// The remaining window with the lifetime of the underlying slice.
    #[inline]
    pub fn chunk_shared_lifetime(&self) -> &'a [u8] {
        &self.buf[self.start..self.end]
    }

    /// Offset of the cursor from the start of the underlying slice.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }
}

impl<'a> Buf for Cursor<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for Cursor<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        assert!(cnt <= self.start);
        self.start -= cnt;
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.end -= cnt;
    }
}

/// A writable cursor over a byte slice.
///
/// Frames are built by placing the payload at the tail of the slice,
/// advancing the cursor to it, and then prepending each header into the
/// headroom in front of the cursor.
#[derive(Debug)]
pub struct CursorMut<'a> {
    buf: &'a mut [u8],
    start: usize,
    end: usize,
}

impl<'a> CursorMut<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        let end = buf.len();
        CursorMut { buf, start: 0, end }
    }

    /// The full underlying slice, up to the current end of the window.
    #[inline]
    pub fn buf(&self) -> &[u8] {
        &self.buf[..self.end]
    }

    /// Offset of the cursor from the start of the underlying slice.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.start
    }

    /// Consume the cursor, returning the remaining window.
    #[inline]
    pub fn chunk_mut_shared_lifetime(self) -> &'a mut [u8] {
        &mut self.buf[self.start..self.end]
    }
}

impl<'a> Buf for CursorMut<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.start += cnt;
    }
}

impl<'a> PktBuf for CursorMut<'a> {
    #[inline]
    fn move_back(&mut self, cnt: usize) {
        assert!(cnt <= self.start);
        self.start -= cnt;
    }

    #[inline]
    fn trim_off(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.end -= cnt;
    }
}

impl<'a> PktBufMut for CursorMut<'a> {
    #[inline]
    fn chunk_headroom(&self) -> usize {
        self.start
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.start..self.end]
    }
}

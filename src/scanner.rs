//! Byte cursor used by the decoder.
//!
//! The scanner owns nothing but an offset into an immutable buffer. Every
//! read moves the offset forward; none of them allocate or buffer.

/// Cursor over a fixed input buffer.
pub(crate) struct Scanner<'a> {
    data: &'a [u8],
    off: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Scanner { data, off: 0 }
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.off
    }

    /// Next byte, or `None` at end of input.
    #[inline]
    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let c = self.data.get(self.off).copied()?;
        self.off += 1;
        Some(c)
    }

    /// Consumes through the next `delim` and returns its offset.
    ///
    /// When `delim` does not occur the scanner moves to the end of the buffer
    /// and `None` is returned.
    pub(crate) fn read_until(&mut self, delim: u8) -> Option<usize> {
        match self.data[self.off..].iter().position(|&b| b == delim) {
            Some(i) => {
                let end = self.off + i;
                self.off = end + 1;
                Some(end)
            }
            None => {
                self.off = self.data.len();
                None
            }
        }
    }

    /// Consumes the rest of the line, newline included, and returns the
    /// offset where the line's content ends.
    pub(crate) fn read_line(&mut self) -> usize {
        self.read_until(b'\n').unwrap_or(self.data.len())
    }

    /// Consumes through the next `delim` or newline, whichever comes first.
    ///
    /// Returns the offset of `delim` when it was found on the current line,
    /// `None` when a newline or the end of input came first.
    pub(crate) fn read_until_on_line(&mut self, delim: u8) -> Option<usize> {
        let rest = &self.data[self.off..];
        match rest.iter().position(|&b| b == delim || b == b'\n') {
            Some(i) => {
                let end = self.off + i;
                self.off = end + 1;
                (self.data[end] == delim).then_some(end)
            }
            None => {
                self.off = self.data.len();
                None
            }
        }
    }

    /// Checks that only horizontal whitespace remains before the next newline.
    ///
    /// On success the scanner stops on the newline without consuming it, so
    /// the caller still sees the line end. On failure it stops just past the
    /// first offending byte.
    pub(crate) fn rest_of_line_blank(&mut self) -> bool {
        while let Some(&c) = self.data.get(self.off) {
            match c {
                b'\n' => return true,
                b' ' | b'\t' | b'\r' => self.off += 1,
                _ => {
                    self.off += 1;
                    return false;
                }
            }
        }
        true
    }
}

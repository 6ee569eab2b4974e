//! Bounds-checked reader over a frame slice.
//!
//! Every decoder reads its fields through a [`Cursor`]. Each read checks the
//! remaining length first and fails with [`DecodeError::Truncated`] instead of
//! indexing past the end.

use crate::error::{DecodeError, Result};

/// Sequential big-endian reader tagged with the layer it decodes.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    layer: &'static str,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8], layer: &'static str) -> Self {
        Self {
            data,
            pos: 0,
            layer,
        }
    }

    /// Current offset from the start of the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Fail unless at least `n` more bytes are available.
    pub fn require(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(DecodeError::truncated(
                self.layer,
                self.pos + n,
                self.data.len(),
            ));
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.require(n)?;
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }
}

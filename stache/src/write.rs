//! The [`Writer`] trait
use std::{fmt, io};

use crate::Result;

/// Rendered output destination.
pub trait Writer {
    fn write_str(&mut self, value: &str) -> Result<()>;
}

impl<R> Writer for &mut R where R: Writer {
    fn write_str(&mut self, value: &str) -> Result<()> {
        R::write_str(self, value)
    }
}

impl Writer for Vec<u8> {
    fn write_str(&mut self, value: &str) -> Result<()> {
        self.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

impl Writer for String {
    fn write_str(&mut self, value: &str) -> Result<()> {
        self.push_str(value);
        Ok(())
    }
}

impl Writer for bytes::BytesMut {
    fn write_str(&mut self, value: &str) -> Result<()> {
        bytes::BufMut::put(self, value.as_bytes());
        Ok(())
    }
}

/// [`Writer`] for [`io::Write`].
pub struct IoWriter<W>(pub W);

impl<W> Writer for IoWriter<W> where W: io::Write {
    fn write_str(&mut self, value: &str) -> Result<()> {
        Ok(self.0.write_all(value.as_bytes())?)
    }
}

/// [`Writer`] for [`fmt::Write`].
pub struct FmtWriter<W>(pub W);

impl<W> Writer for FmtWriter<W> where W: fmt::Write {
    fn write_str(&mut self, value: &str) -> Result<()> {
        Ok(self.0.write_str(value)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writers() {
        let mut string = String::new();
        let mut bytes = bytes::BytesMut::new();
        let mut io = IoWriter(Vec::new());
        let mut fmt = FmtWriter(String::new());

        (&mut string).write_str("a").unwrap();
        string.write_str("b").unwrap();
        bytes.write_str("ab").unwrap();
        io.write_str("ab").unwrap();
        fmt.write_str("ab").unwrap();

        assert_eq!(string, "ab");
        assert_eq!(&bytes[..], b"ab");
        assert_eq!(io.0, b"ab");
        assert_eq!(fmt.0, "ab");
    }
}

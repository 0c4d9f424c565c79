//! Buffered XML writer for package parts

use crate::error::Result;
use std::io::Write;

/// XML writer that batches small writes before handing them to the sink
pub struct XmlWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(writer: W) -> Self {
        XmlWriter {
            writer,
            buffer: Vec::with_capacity(8192),
        }
    }

    /// Write raw bytes directly
    #[inline]
    pub fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        if self.buffer.len() > 4096 {
            self.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_raw(s.as_bytes())
    }

    /// Standard declaration every part starts with
    pub fn declaration(&mut self) -> Result<()> {
        self.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n")
    }

    /// Open a start tag; follow with attributes and `close_start_tag` or `close_empty`
    #[inline]
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"<")?;
        self.write_str(name)
    }

    #[inline]
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"</")?;
        self.write_str(name)?;
        self.write_raw(b">")
    }

    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.write_raw(b" ")?;
        self.write_str(name)?;
        self.write_raw(b"=\"")?;
        self.write_escaped(value)?;
        self.write_raw(b"\"")
    }

    #[inline]
    pub fn attribute_int(&mut self, name: &str, value: i64) -> Result<()> {
        let mut num = itoa::Buffer::new();
        self.write_raw(b" ")?;
        self.write_str(name)?;
        self.write_raw(b"=\"")?;
        self.write_str(num.format(value))?;
        self.write_raw(b"\"")
    }

    #[inline]
    pub fn close_start_tag(&mut self) -> Result<()> {
        self.write_raw(b">")
    }

    #[inline]
    pub fn close_empty(&mut self) -> Result<()> {
        self.write_raw(b"/>")
    }

    /// `<name>text</name>` with the text escaped
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start_element(name)?;
        self.close_start_tag()?;
        self.write_escaped(text)?;
        self.end_element(name)
    }

    /// Write text content with XML escaping
    ///
    /// Control characters other than tab, newline and carriage return are not
    /// allowed in XML 1.0 and are dropped.
    pub fn write_escaped(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            match c {
                '&' => self.buffer.extend_from_slice(b"&amp;"),
                '<' => self.buffer.extend_from_slice(b"&lt;"),
                '>' => self.buffer.extend_from_slice(b"&gt;"),
                '"' => self.buffer.extend_from_slice(b"&quot;"),
                '\'' => self.buffer.extend_from_slice(b"&apos;"),
                '\t' | '\n' | '\r' => self.buffer.push(c as u8),
                c if c.is_control() => {}
                c => {
                    let mut utf8 = [0u8; 4];
                    self.buffer
                        .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
        }
        if self.buffer.len() > 4096 {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush buffer to underlying writer
    pub fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        self.writer.flush()?;
        Ok(())
    }
}

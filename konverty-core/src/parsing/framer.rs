//! Line framing for ffmpeg's stderr.
//!
//! ffmpeg refreshes its stats line in place with a bare carriage return and
//! writes ordinary log lines with a newline. Both bytes end a logical line
//! here; the distinction is not needed by the parser.

use std::io::{BufReader, Bytes, Read};

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Iterator over the logical lines of a byte stream.
///
/// Lines are split on CR or LF. Empty lines between two terminators are
/// yielded as empty strings. A non-empty unterminated tail is yielded once the
/// stream ends. Read errors end the stream the same way end-of-file does.
pub struct LineFramer<R: Read> {
    bytes: Bytes<BufReader<R>>,
    buf: Vec<u8>,
    finished: bool,
}

impl<R: Read> LineFramer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            buf: Vec::with_capacity(256),
            finished: false,
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        line
    }

    fn flush(&mut self) -> Option<String> {
        self.finished = true;
        if self.buf.is_empty() {
            None
        } else {
            Some(self.take_line())
        }
    }
}

impl<R: Read> Iterator for LineFramer<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        loop {
            match self.bytes.next() {
                Some(Ok(CR | LF)) => return Some(self.take_line()),
                Some(Ok(byte)) => self.buf.push(byte),
                Some(Err(e)) => {
                    log::debug!("Read error on tool output, treating as end of stream: {e}");
                    return self.flush();
                }
                None => return self.flush(),
            }
        }
    }
}

use crate::error::DecodeError;
use crate::{ESCAPE, MAX_RUN};
use std::io;

pub struct DeRle<W> {
    status: DeRleStatus,
    consumed: usize,
    writer: W,
}

#[derive(Copy, Clone, Debug)]
enum DeRleStatus {
    /// Outside any escape token, bytes pass through literally.
    Wait,
    /// An escape marker was read, the next byte is the run length.
    Length,
    /// The run length was read, the next byte is the run value.
    Value { count: u8 },
}

impl<W: io::Write> DeRle<W> {
    pub fn new(writer: W) -> DeRle<W> {
        DeRle {
            status: DeRleStatus::Wait,
            consumed: 0,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> Result<(), DecodeError> {
        trace!("update byte {byte:02x}");
        trace!("current status {:?}", self.status);
        self.consumed += 1;
        match self.status {
            DeRleStatus::Wait => {
                if byte == ESCAPE {
                    self.status = DeRleStatus::Length;
                    trace!("transit to {:?}", self.status);
                } else {
                    self.writer.write_all(&[byte])?;
                }
            }
            DeRleStatus::Length => {
                self.status = DeRleStatus::Value { count: byte };
                trace!("transit to {:?}", self.status);
            }
            DeRleStatus::Value { count } => {
                trace!("emit {count} x {byte:02x}");
                let run = [byte; MAX_RUN as usize];
                self.writer.write_all(&run[..count as usize])?;
                self.status = DeRleStatus::Wait;
                trace!("transit to {:?}", self.status);
            }
        }
        Ok(())
    }

    /// The encoder never leaves an escape token half written, so ending
    /// mid-token means the stream was cut short.
    pub fn finalize(mut self) -> Result<(), DecodeError> {
        trace!("last status: {:?}", self.status);
        match self.status {
            DeRleStatus::Wait => {
                self.writer.flush()?;
                Ok(())
            }
            DeRleStatus::Length | DeRleStatus::Value { .. } => {
                Err(DecodeError::MalformedStream {
                    offset: self.consumed,
                })
            }
        }
    }
}

impl<W: io::Write> io::Write for DeRle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            self.update(*byte).map_err(DecodeError::into_io)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One-shot decode of a run-length stream back into the original bytes.
///
/// The caller chooses how to reinterpret the bytes; see
/// [`RunLengthDecoder`](crate::RunLengthDecoder) for the UTF-8 text path.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut derle = DeRle::new(&mut out);
    for &byte in input {
        derle.update(byte)?;
    }
    derle.finalize()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{decode, DeRle};
    use crate::{encode, DecodeError, TEST_VECTOR};
    use std::io::Write;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Setup function that is only run once, even if called multiple times.
    fn setup() {
        INIT.call_once(|| {
            let _ = pretty_env_logger::try_init();
        });
    }

    #[test]
    fn test_derle_decode() {
        setup();
        for (expected, input) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let expected = hex::decode(expected).unwrap();
            let mut out = vec![];
            let mut derle = DeRle::new(&mut out);
            derle.write_all(&input).unwrap();
            derle.finalize().unwrap();
            assert_eq!(expected, out);
        }
    }

    #[test]
    fn test_derle_decode_run_at_cap() {
        setup();
        assert_eq!(decode(&[0x00, 0xFF, 0x41]).unwrap(), [0x41; 255]);
        assert_eq!(decode(&[0x00, 0xFF, 0x41, 0x41]).unwrap(), [0x41; 256]);
    }

    #[test]
    fn test_derle_decode_zero_length_run() {
        setup();
        assert_eq!(decode(&[0x00, 0x00, 0x58]).unwrap(), []);
    }

    #[test]
    fn test_derle_rejects_truncated_escape() {
        setup();
        match decode(&[0x00]) {
            Err(DecodeError::MalformedStream { offset: 1 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
        match decode(&[0x00, 0x05]) {
            Err(DecodeError::MalformedStream { offset: 2 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
        match decode(&[0x41, 0x41, 0x00, 0x17]) {
            Err(DecodeError::MalformedStream { offset: 4 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_round_trip() {
        setup();
        let samples = [
            "",
            "Mack Chyson =======================",
            "aabbccddeeff",
            "no repeats here",
            "trailing run aaaaaaaaaaaaaaaa",
            "\0\0mixed\0runs\0\0\0",
        ];
        for text in samples {
            let encoded = encode(text.as_bytes());
            assert_eq!(decode(&encoded).unwrap(), text.as_bytes());
        }
    }
}

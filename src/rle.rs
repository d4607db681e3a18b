use crate::{ESCAPE, MAX_RUN};
use std::io;

pub struct Rle<W> {
    status: RleStatus,
    writer: W,
}

/// `Run` holds the run in progress; `value` is never the escape marker
/// and `count` stays below the cap.
#[derive(Copy, Clone, Debug)]
enum RleStatus {
    Run { value: u8, count: u8 },
    Wait,
}

impl<W: io::Write> Rle<W> {
    pub fn new(writer: W) -> Self {
        Rle {
            status: RleStatus::Wait,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> io::Result<()> {
        trace!("update byte {byte:02x}");
        trace!("current status {:?}", self.status);
        match self.status {
            RleStatus::Wait => {
                if byte == ESCAPE {
                    // a zero never starts a run, emit it escaped right away
                    trace!("escape lone zero");
                    self.writer.write_all(&[ESCAPE, 1, ESCAPE])?;
                } else {
                    self.status = RleStatus::Run {
                        value: byte,
                        count: 1,
                    };
                    trace!("transit to {:?}", self.status);
                }
                Ok(())
            }
            RleStatus::Run { value, count } => {
                if byte == value {
                    self.status = RleStatus::Run {
                        value,
                        count: count + 1,
                    };
                    trace!("transit to {:?}", self.status);
                    if count + 1 == MAX_RUN {
                        // the count field is one byte, cut the run here
                        let (token, len) = self.status.try_encode().unwrap();
                        self.writer.write_all(&token[..len])?;
                        self.status = RleStatus::Wait;
                        trace!("transit to {:?}", self.status);
                    }
                    Ok(())
                } else {
                    let (token, len) = self.status.try_encode().unwrap();
                    self.writer.write_all(&token[..len])?;
                    self.status = RleStatus::Wait;
                    trace!("transit to {:?}, refeed", self.status);
                    self.update(byte)
                }
            }
        }
    }

    pub fn finalize(mut self) -> io::Result<()> {
        trace!("last block: {:?}", self.status);
        if let Some((token, len)) = self.status.try_encode() {
            self.writer.write_all(&token[..len])?;
        }
        self.writer.flush()
    }
}

impl RleStatus {
    /// Encoded form of the accumulated run and its length in bytes.
    /// Runs of one or two bytes stay literal, anything longer takes the
    /// escape form.
    #[inline(always)]
    fn try_encode(self) -> Option<([u8; 3], usize)> {
        match self {
            RleStatus::Wait => None,
            RleStatus::Run { value, count: 1 } => Some(([value, 0, 0], 1)),
            RleStatus::Run { value, count: 2 } => Some(([value, value, 0], 2)),
            RleStatus::Run { value, count } => Some(([ESCAPE, count, value], 3)),
        }
    }
}

impl<W: io::Write> io::Write for Rle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            self.update(*byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One-shot encode of `input`, returning the run-length stream.
///
/// Every byte sequence has a defined encoding, so this cannot fail.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut rle = Rle::new(&mut out);
    for &byte in input {
        rle.update(byte).unwrap();
    }
    rle.finalize().unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::{encode, Rle};
    use crate::TEST_VECTOR;
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
    fn test_rle_encode() {
        setup();
        for (input, expected) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let expected = hex::decode(expected).unwrap();
            let mut out = vec![];
            let mut rle = Rle::new(&mut out);
            rle.write_all(&input).unwrap();
            rle.finalize().unwrap();
            assert_eq!(expected, out);
        }
    }

    #[test]
    fn test_rle_encode_run_at_cap() {
        setup();
        assert_eq!(encode(&[0x41; 255]), [0x00, 0xFF, 0x41]);
        assert_eq!(encode(&[0x41; 256]), [0x00, 0xFF, 0x41, 0x41]);
        assert_eq!(encode(&[0x41; 257]), [0x00, 0xFF, 0x41, 0x41, 0x41]);
        assert_eq!(
            encode(&[0x41; 510]),
            [0x00, 0xFF, 0x41, 0x00, 0xFF, 0x41]
        );
    }

    #[test]
    fn test_rle_encode_example_string() {
        setup();
        let text = "Mack Chyson =======================";
        let mut expected = b"Mack Chyson ".to_vec();
        expected.extend([0x00, 23, b'=']);
        assert_eq!(encode(text.as_bytes()), expected);
    }
}

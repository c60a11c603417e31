#[cfg(target_os = "espidf")]
mod uart;
mod report;

#[cfg(target_os = "espidf")]
pub use uart::*;
pub use report::*;

use crate::utils::voltage_monitor_error::UARTError;

/// One way byte output, such as a UART transmitter
pub trait SerialSink {
    /// Writes as many bytes as the output accepts right now.
    ///
    /// # Returns
    ///
    /// A `Result` with the amount of bytes written, or an `UARTError` if the write failed
    fn write(&mut self, bytes: &[u8]) -> Result<usize, UARTError>;

    /// Writes every byte, retrying until the output took all of them.
    ///
    /// # Errors
    ///
    /// - `UARTError::IncompleteWrite`: If the output stops accepting bytes
    /// - `UARTError::WriteError`: If the underlying write fails
    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), UARTError> {
        while !bytes.is_empty() {
            let written = self.write(bytes)?;
            if written == 0 {
                return Err(UARTError::IncompleteWrite);
            }
            bytes = &bytes[written..];
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Accepts at most `chunk` bytes per write
    struct ChunkedSink {
        chunk: usize,
        written: Vec<u8>,
        calls: usize,
    }

    impl SerialSink for ChunkedSink {
        fn write(&mut self, bytes: &[u8]) -> Result<usize, UARTError> {
            self.calls += 1;
            let amount = bytes.len().min(self.chunk);
            self.written.extend_from_slice(&bytes[..amount]);
            Ok(amount)
        }
    }

    #[test]
    fn test0_write_all_retries_partial_writes() {
        let mut sink = ChunkedSink { chunk: 4, written: vec![], calls: 0 };
        sink.write_all(b"A2:1.000000 A3:2.000000\n").unwrap();
        assert_eq!(sink.written, b"A2:1.000000 A3:2.000000\n");
        assert_eq!(sink.calls, 6);
    }

    #[test]
    fn test1_write_all_stops_when_nothing_is_accepted() {
        let mut sink = ChunkedSink { chunk: 0, written: vec![], calls: 0 };
        assert_eq!(sink.write_all(b"abc"), Err(UARTError::IncompleteWrite));
        assert!(sink.write_all(b"").is_ok());
    }
}

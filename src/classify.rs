//! GPS classification of a candidate's byte stream.

use crate::port::{PortError, SerialPortAdapter};
use memchr::memmem;
use std::time::{Duration, Instant};
use tracing::trace;

/// Whether `data` contains `marker`.
///
/// An empty marker matches nothing, so a misconfigured run cannot claim every
/// device as a GPS receiver.
pub fn is_gps(data: &[u8], marker: &[u8]) -> bool {
    !marker.is_empty() && memmem::find(data, marker).is_some()
}

/// Read at most `budget` bytes from `port` within `timeout`.
///
/// Short reads are accumulated until the budget is filled, the deadline
/// passes, the port reports a timeout, or the stream ends. Timeouts only end
/// the sample; every other read error is returned.
pub fn sample(
    port: &mut dyn SerialPortAdapter,
    budget: usize,
    timeout: Duration,
) -> Result<Vec<u8>, PortError> {
    let deadline = Instant::now() + timeout;
    let mut buffer = vec![0u8; budget];
    let mut filled = 0;

    while filled < budget {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        port.set_timeout(remaining)?;

        match port.read_bytes(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => {
                trace!("{}: read {} byte(s)", port.name(), n);
                filled += n;
            }
            Err(e) if e.is_timeout() => break,
            Err(e) => return Err(e),
        }
    }

    buffer.truncate(filled);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;
    use proptest::prelude::*;

    const MARKER: &[u8] = b"\n$GP";

    #[test]
    fn test_nmea_stream_is_gps() {
        assert!(is_gps(
            b"\xff\x00garbage\r\n$GPGGA,123519,4807.038,N\r\n",
            MARKER
        ));
        assert!(is_gps(b"\n$GP", MARKER));
    }

    #[test]
    fn test_sentence_without_leading_newline_is_not_gps() {
        // Mid-sentence starts are common; only a sentence after a line break counts.
        assert!(!is_gps(b"$GPGGA,123519,4807.038,N\r\n", MARKER));
        assert!(!is_gps(b"\r\n$GNGGA,123519\r\n", MARKER));
        assert!(!is_gps(b"", MARKER));
    }

    #[test]
    fn test_empty_marker_matches_nothing() {
        assert!(!is_gps(b"anything", b""));
    }

    #[test]
    fn test_sample_collects_chunks_up_to_budget() {
        let mut port = MockSerialPort::emitting("MOCK0", &[b'x'; 300]);
        port.set_chunk_size(64);

        let data = sample(&mut port, 256, Duration::from_secs(3)).unwrap();
        assert_eq!(data.len(), 256);
        assert_eq!(port.available_bytes(), 44);
        assert_eq!(port.read_count(), 4);
    }

    #[test]
    fn test_sample_stops_on_idle_line() {
        let mut port = MockSerialPort::emitting("MOCK0", b"\n$GPRMC");
        let data = sample(&mut port, 256, Duration::from_secs(3)).unwrap();
        assert_eq!(data, b"\n$GPRMC");
    }

    #[test]
    fn test_sample_bounds_port_timeout_by_deadline() {
        let mut port = MockSerialPort::emitting("MOCK0", b"abc");
        sample(&mut port, 256, Duration::from_secs(3)).unwrap();
        assert!(port.timeout() <= Duration::from_secs(3));
    }

    #[test]
    fn test_sample_zero_timeout_reads_nothing() {
        let mut port = MockSerialPort::emitting("MOCK0", b"abc");
        let data = sample(&mut port, 256, Duration::ZERO).unwrap();
        assert!(data.is_empty());
        assert_eq!(port.read_count(), 0);
    }

    #[test]
    fn test_sample_timeout_is_not_an_error() {
        let mut port = MockSerialPort::emitting("MOCK0", b"abc");
        port.set_should_timeout(true);
        let data = sample(&mut port, 256, Duration::from_secs(3)).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_sample_propagates_read_errors() {
        let mut port = MockSerialPort::emitting("MOCK0", b"abc");
        port.fail_next_read(std::io::ErrorKind::BrokenPipe);
        assert!(sample(&mut port, 256, Duration::from_secs(3)).is_err());
    }

    #[test]
    fn test_marker_past_budget_is_ignored() {
        let mut stream = vec![b'.'; 254];
        stream.extend_from_slice(b"\n$GPGGA\r\n");
        let mut port = MockSerialPort::emitting("MOCK0", &stream);

        let data = sample(&mut port, 256, Duration::from_secs(3)).unwrap();
        assert!(!is_gps(&data, MARKER));
    }

    proptest! {
        #[test]
        fn prop_marker_anywhere_is_detected(
            prefix in proptest::collection::vec(any::<u8>(), 0..128),
            suffix in proptest::collection::vec(any::<u8>(), 0..124),
        ) {
            let mut data = prefix;
            data.extend_from_slice(MARKER);
            data.extend_from_slice(&suffix);
            prop_assert!(is_gps(&data, MARKER));
        }

        #[test]
        fn prop_streams_without_dollar_are_not_gps(
            data in proptest::collection::vec(
                any::<u8>().prop_filter("no '$'", |b| *b != b'$'),
                0..256,
            ),
        ) {
            prop_assert!(!is_gps(&data, MARKER));
        }
    }
}

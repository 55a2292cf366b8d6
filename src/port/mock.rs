//! Mock serial devices for testing.
//!
//! `MockSerialPort` replays queued bytes; `MockOpener` hands out mock ports by
//! path and records which paths were opened, so tests can check scan order
//! without hardware.

use super::error::PortError;
use super::traits::{PortConfiguration, PortOpener, SerialPortAdapter};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct MockPortState {
    /// Bytes returned by subsequent reads.
    read_queue: VecDeque<u8>,
    /// Largest chunk a single read hands out, 0 for unlimited.
    chunk_size: usize,
    /// Whether the next read should time out.
    should_timeout: bool,
    /// Error kind the next read fails with.
    read_failure: Option<std::io::ErrorKind>,
    timeout: Duration,
    reads: usize,
}

/// Mock serial port for testing.
///
/// # Example
/// ```
/// use detect_gps::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"$GPGGA");
///
/// let mut buffer = [0u8; 6];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"$GPGGA");
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    name: String,
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock serial port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState {
                timeout: Duration::from_secs(1),
                ..Default::default()
            })),
        }
    }

    /// Create a mock port that will emit `data`.
    pub fn emitting(name: impl Into<String>, data: &[u8]) -> Self {
        let mut port = Self::new(name);
        port.enqueue_read(data);
        port
    }

    /// Enqueue bytes to be returned by subsequent read operations.
    pub fn enqueue_read(&mut self, data: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.read_queue.extend(data);
    }

    /// Hand out at most `chunk_size` bytes per read, like a slow UART.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        let mut state = self.state.lock().unwrap();
        state.chunk_size = chunk_size;
    }

    /// Set whether the next read operation should time out.
    pub fn set_should_timeout(&mut self, should_timeout: bool) {
        let mut state = self.state.lock().unwrap();
        state.should_timeout = should_timeout;
    }

    /// Make the next read fail with an I/O error of the given kind.
    pub fn fail_next_read(&mut self, kind: std::io::ErrorKind) {
        let mut state = self.state.lock().unwrap();
        state.read_failure = Some(kind);
    }

    /// Get the number of bytes still queued.
    pub fn available_bytes(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.read_queue.len()
    }

    /// Number of `read_bytes` calls made so far.
    pub fn read_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.reads
    }

    /// Timeout most recently set on the port.
    pub fn timeout(&self) -> Duration {
        let state = self.state.lock().unwrap();
        state.timeout
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;

        if let Some(kind) = state.read_failure.take() {
            return Err(PortError::Io(std::io::Error::new(
                kind,
                "simulated read failure",
            )));
        }

        if state.should_timeout {
            state.should_timeout = false;
            return Err(PortError::timeout(state.timeout));
        }

        let limit = match state.chunk_size {
            0 => buffer.len(),
            n => n.min(buffer.len()),
        };

        let mut bytes_read = 0;
        for byte in buffer[..limit].iter_mut() {
            match state.read_queue.pop_front() {
                Some(queued) => {
                    *byte = queued;
                    bytes_read += 1;
                }
                None => break,
            }
        }

        if bytes_read == 0 && limit > 0 {
            // An idle line: the driver gives up once the timeout expires.
            Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "No data available",
            )))
        } else {
            Ok(bytes_read)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), PortError> {
        let mut state = self.state.lock().unwrap();
        state.timeout = timeout;
        Ok(())
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}

#[derive(Debug, Clone)]
enum MockDevice {
    Port(MockSerialPort),
    OpenFailure(std::io::ErrorKind),
}

/// `PortOpener` handing out registered mock devices.
///
/// Opening an unregistered path fails with [`PortError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MockOpener {
    devices: HashMap<PathBuf, MockDevice>,
    opened: Arc<Mutex<Vec<(PathBuf, PortConfiguration)>>>,
}

impl MockOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device at `path` that emits `data`.
    pub fn with_device(mut self, path: impl Into<PathBuf>, data: &[u8]) -> Self {
        let path = path.into();
        let port = MockSerialPort::emitting(path.display().to_string(), data);
        self.devices.insert(path, MockDevice::Port(port));
        self
    }

    /// Register a preconfigured mock port at `path`.
    pub fn with_port(mut self, path: impl Into<PathBuf>, port: MockSerialPort) -> Self {
        self.devices.insert(path.into(), MockDevice::Port(port));
        self
    }

    /// Register a device at `path` whose open fails with `kind`.
    pub fn with_open_failure(
        mut self,
        path: impl Into<PathBuf>,
        kind: std::io::ErrorKind,
    ) -> Self {
        self.devices
            .insert(path.into(), MockDevice::OpenFailure(kind));
        self
    }

    /// Paths opened so far, in order.
    pub fn opened_paths(&self) -> Vec<PathBuf> {
        let opened = self.opened.lock().unwrap();
        opened.iter().map(|(path, _)| path.clone()).collect()
    }

    /// Line settings used for each open, in order.
    pub fn opened_configs(&self) -> Vec<PortConfiguration> {
        let opened = self.opened.lock().unwrap();
        opened.iter().map(|(_, config)| config.clone()).collect()
    }
}

impl PortOpener for MockOpener {
    fn open(
        &self,
        path: &Path,
        config: &PortConfiguration,
    ) -> Result<Box<dyn SerialPortAdapter>, PortError> {
        self.opened
            .lock()
            .unwrap()
            .push((path.to_path_buf(), config.clone()));

        match self.devices.get(path) {
            Some(MockDevice::Port(port)) => {
                let mut port = port.clone();
                port.set_timeout(config.timeout)?;
                Ok(Box::new(port))
            }
            Some(MockDevice::OpenFailure(kind)) => Err(PortError::Io(std::io::Error::new(
                *kind,
                "simulated open failure",
            ))),
            None => Err(PortError::not_found(path.display().to_string())),
        }
    }
}

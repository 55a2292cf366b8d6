//! Plain-file stand-in for a serial device.
//!
//! Line settings only make sense for character devices. A regular file matching
//! the candidate pattern (a captured NMEA log, for instance) is read as-is.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// A regular-file candidate, read without line settings.
pub struct FilePort {
    file: File,
    name: String,
}

impl FilePort {
    /// Open `path` read-only.
    pub fn open(path: &Path) -> Result<Self, PortError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PortError::not_found(path.display().to_string()),
            _ => PortError::Io(e),
        })?;

        Ok(Self {
            file,
            name: path.display().to_string(),
        })
    }
}

impl SerialPortAdapter for FilePort {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        self.file.read(buffer).map_err(PortError::Io)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_timeout(&mut self, _timeout: Duration) -> Result<(), PortError> {
        // Regular files never block, so there is nothing to bound.
        Ok(())
    }
}

impl std::fmt::Debug for FilePort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePort")
            .field("name", &self.name)
            .finish()
    }
}

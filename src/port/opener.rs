//! Production `PortOpener`.

use super::error::PortError;
use super::file_port::FilePort;
use super::sync_port::SyncSerialPort;
use super::traits::{PortConfiguration, PortOpener, SerialPortAdapter};
use std::os::unix::fs::FileTypeExt;
use std::path::Path;
use tracing::debug;

/// Opens character devices through `serialport` and regular files as
/// captures. Any other node type is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceOpener;

impl PortOpener for DeviceOpener {
    fn open(
        &self,
        path: &Path,
        config: &PortConfiguration,
    ) -> Result<Box<dyn SerialPortAdapter>, PortError> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PortError::not_found(path.display().to_string()),
            _ => PortError::Io(e),
        })?;

        let file_type = metadata.file_type();
        if file_type.is_char_device() {
            let name = path
                .to_str()
                .ok_or_else(|| PortError::config("device path is not UTF-8"))?;
            debug!("Opening {} at {} baud", name, config.baud_rate);
            Ok(Box::new(SyncSerialPort::open(name, config)?))
        } else if file_type.is_file() {
            debug!("Reading {} as a capture file", path.display());
            Ok(Box::new(FilePort::open(path)?))
        } else {
            // FIFOs and sockets can block on open or read with no way to
            // bound the wait.
            Err(PortError::config(format!(
                "{} is neither a character device nor a regular file",
                path.display()
            )))
        }
    }
}

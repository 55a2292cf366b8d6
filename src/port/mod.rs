//! Port abstraction layer for serial communication.
//!
//! Provides the adapter traits, the `serialport`-backed implementation, a
//! plain-file fallback and mocks for testing.

pub mod error;
pub mod file_port;
pub mod mock;
pub mod opener;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use file_port::FilePort;
pub use mock::{MockOpener, MockSerialPort};
pub use opener::DeviceOpener;
pub use sync_port::SyncSerialPort;
pub use traits::*;

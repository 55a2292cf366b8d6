//! GPS Device Detection Library
//!
//! Finds the GPS receiver among USB-serial adapters by sniffing for NMEA
//! sentences, and keeps stable `/dev/gps` and `/dev/radio` symlinks pointing
//! at the right nodes.
//!
//! # Modules
//!
//! - `config`: Fixed detection settings
//! - `discovery`: Candidate enumeration from a device glob
//! - `port`: Port abstraction layer for serial communication
//! - `classify`: Byte sampling and GPS classification
//! - `link`: Symlink creation and listing
//! - `detector`: The detection procedure
//! - `error`: Run-level error type

pub mod classify;
pub mod config;
pub mod detector;
pub mod discovery;
pub mod error;
pub mod link;
pub mod port;

pub use config::DetectConfig;
pub use detector::{DetectReport, Detector};
pub use discovery::{CandidateSet, DevicePattern, DiscoveryError};
pub use error::AppError;
pub use port::{
    DeviceOpener, FilePort, MockOpener, MockSerialPort, PortConfiguration, PortError, PortOpener,
    SerialPortAdapter, SyncSerialPort,
};

//! Detection settings.
//!
//! The values are fixed for the binary; grouping them lets tests point a run at
//! a scratch directory instead of `/dev`.

use crate::port::{PortConfiguration, NMEA_BAUD_RATE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Glob matching USB-serial adapters.
pub const DEFAULT_PATTERN: &str = "/dev/ttyUSB*";
/// Where the GPS receiver gets linked.
pub const DEFAULT_GPS_LINK: &str = "/dev/gps";
/// Where the first leftover device gets linked.
pub const DEFAULT_RADIO_LINK: &str = "/dev/radio";
/// Start of any GPS talker sentence following a line break.
pub const DEFAULT_MARKER: &[u8] = b"\n$GP";
/// Bytes sampled per candidate.
pub const DEFAULT_READ_BUDGET: usize = 256;
/// Overall read timeout per candidate, in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 3000;

/// Settings for one detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Glob for candidate device nodes
    pub pattern: String,
    /// Line speed used to probe every candidate
    pub baud_rate: u32,
    /// Overall read timeout per candidate in milliseconds
    pub read_timeout_ms: u64,
    /// Maximum bytes sampled per candidate
    pub read_budget: usize,
    /// Byte string identifying a GPS receiver
    pub marker: Vec<u8>,
    /// Symlink for the GPS receiver
    pub gps_link: PathBuf,
    /// Symlink for the fallback device
    pub radio_link: PathBuf,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            baud_rate: NMEA_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            read_budget: DEFAULT_READ_BUDGET,
            marker: DEFAULT_MARKER.to_vec(),
            gps_link: PathBuf::from(DEFAULT_GPS_LINK),
            radio_link: PathBuf::from(DEFAULT_RADIO_LINK),
        }
    }
}

impl DetectConfig {
    /// Get the read timeout as Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Line settings every candidate is opened with.
    pub fn port_configuration(&self) -> PortConfiguration {
        PortConfiguration {
            baud_rate: self.baud_rate,
            ..PortConfiguration::nmea(self.read_timeout())
        }
    }
}

//! Shared test utilities.
//!
//! A `DeviceBench` is a scratch directory standing in for `/dev`: candidate
//! nodes are plain files holding what the device would emit, and the GPS and
//! radio links are created next to them.

#![allow(dead_code)]

use detect_gps::DetectConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A typical burst from a receiver joined mid-sentence.
pub const NMEA_BURST: &[u8] = b"0.9,545.4,M,46.9,M,,*47\r\n\
$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

/// Chatter from a modem-style radio.
pub const RADIO_CHATTER: &[u8] = b"\r\nOK\r\nAT+CSQ\r\n+CSQ: 21,99\r\n";

pub struct DeviceBench {
    dir: TempDir,
}

impl DeviceBench {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create scratch dir"),
        }
    }

    /// Add a candidate node that emits `data`.
    pub fn add_device(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, data).expect("write device capture");
        path
    }

    /// Add a candidate node that is a named pipe with no writer.
    pub fn add_fifo(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let status = std::process::Command::new("mkfifo")
            .arg(&path)
            .status()
            .expect("run mkfifo");
        assert!(status.success(), "mkfifo failed for {}", path.display());
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn gps_link(&self) -> PathBuf {
        self.path("gps")
    }

    pub fn radio_link(&self) -> PathBuf {
        self.path("radio")
    }

    /// Detection settings aimed at this bench instead of `/dev`.
    pub fn config(&self) -> DetectConfig {
        DetectConfig {
            pattern: format!("{}/ttyUSB*", self.dir.path().display()),
            gps_link: self.gps_link(),
            radio_link: self.radio_link(),
            ..DetectConfig::default()
        }
    }
}

/// Target of the symlink at `link`, if there is one.
pub fn link_target(link: &Path) -> Option<PathBuf> {
    std::fs::read_link(link).ok()
}

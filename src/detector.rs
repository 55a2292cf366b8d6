//! GPS detection and device naming.
//!
//! The `Detector` walks the candidate set in scan order, links the first
//! device that talks NMEA as the GPS receiver and hands the first leftover
//! device the fallback name.

use crate::classify;
use crate::config::DetectConfig;
use crate::discovery::{self, CandidateSet};
use crate::error::AppError;
use crate::link;
use crate::port::PortOpener;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectReport {
    /// Device linked as the GPS receiver.
    pub gps: Option<PathBuf>,
    /// Device linked as the fallback.
    pub radio: Option<PathBuf>,
}

/// Scans candidates and maintains the GPS and fallback symlinks.
pub struct Detector<O: PortOpener> {
    config: DetectConfig,
    opener: O,
}

impl<O: PortOpener> Detector<O> {
    pub fn new(config: DetectConfig, opener: O) -> Self {
        Self { config, opener }
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Run the whole procedure, writing one listing line per link to `out`.
    ///
    /// The first open or read failure aborts the run; links made before it
    /// are left in place.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<DetectReport, AppError> {
        let mut candidates = discovery::enumerate(&self.config.pattern)?;
        if candidates.is_empty() {
            warn!("No devices match {}", self.config.pattern);
            return Ok(DetectReport::default());
        }
        info!(
            "Scanning {} candidate(s) matching {}",
            candidates.len(),
            self.config.pattern
        );

        let gps = self.find_gps(&candidates)?;
        if let Some(path) = &gps {
            self.link(path, &self.config.gps_link, out)?;
            candidates.remove(path);
        } else {
            info!("No GPS receiver found");
        }

        let radio = self.assign_fallback(&candidates, out)?;

        Ok(DetectReport { gps, radio })
    }

    /// First candidate, in scan order, whose sample contains the marker.
    ///
    /// Candidates after the match are not opened.
    pub fn find_gps(&self, candidates: &CandidateSet) -> Result<Option<PathBuf>, AppError> {
        for path in candidates {
            if self.probe(path)? {
                info!("GPS receiver found on {}", path.display());
                return Ok(Some(path.clone()));
            }
        }
        Ok(None)
    }

    /// Open `path`, sample it and classify the bytes.
    pub fn probe(&self, path: &Path) -> Result<bool, AppError> {
        let port_config = self.config.port_configuration();
        let mut port = self
            .opener
            .open(path, &port_config)
            .map_err(|e| AppError::port(path, e))?;

        let data = classify::sample(
            port.as_mut(),
            self.config.read_budget,
            self.config.read_timeout(),
        )
        .map_err(|e| AppError::port(path, e))?;

        let is_gps = classify::is_gps(&data, &self.config.marker);
        debug!(
            "Probed {}: {} byte(s), gps={}",
            path.display(),
            data.len(),
            is_gps
        );
        Ok(is_gps)
    }

    /// Link the first remaining candidate as the fallback device.
    pub fn assign_fallback<W: Write>(
        &self,
        candidates: &CandidateSet,
        out: &mut W,
    ) -> Result<Option<PathBuf>, AppError> {
        let Some(path) = candidates.first() else {
            debug!(
                "No candidates left for {}",
                self.config.radio_link.display()
            );
            return Ok(None);
        };

        self.link(path, &self.config.radio_link, out)?;
        Ok(Some(path.to_path_buf()))
    }

    fn link<W: Write>(
        &self,
        target: &Path,
        link_path: &Path,
        out: &mut W,
    ) -> Result<(), AppError> {
        link::force_symlink(target, link_path)
            .map_err(|e| AppError::link(link_path, e))?;
        info!("Linked {} -> {}", link_path.display(), target.display());

        let listing =
            link::describe(link_path).map_err(|e| AppError::link(link_path, e))?;
        writeln!(out, "{}", listing).map_err(AppError::Output)
    }
}

//! Periodic sampling of panel sunlight into an append-only history and a
//! text sink.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::error::Result;
use crate::geometry;
use crate::types::{FlushOutcome, FlushPolicy, OverlayOrder, Panel, PanelLogEntry, SampleReport};

pub const SAMPLE_INTERVAL_SECS: f32 = 2.0;
pub const DEFAULT_LOG_PATH: &str = "panel_log.txt";
pub const OVERLAY_LIMIT: usize = 10;

/// Destination for persisted log entries.
pub trait LogSink {
    /// Append `entries`, one line each. Returns the number of lines written.
    fn append(&mut self, entries: &[PanelLogEntry]) -> Result<usize>;
}

/// Append-mode text file, reopened on every flush.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&mut self, entries: &[PanelLogEntry]) -> Result<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for entry in entries {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()?;
        Ok(entries.len())
    }
}

/// Keeps formatted lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, entries: &[PanelLogEntry]) -> Result<usize> {
        self.lines.extend(entries.iter().map(|e| e.to_string()));
        Ok(entries.len())
    }
}

pub struct PanelLogRecorder<S> {
    sink: S,
    history: Vec<PanelLogEntry>,
    persisted: usize,
    last_sample: f32,
    interval: f32,
    policy: FlushPolicy,
}

impl<S: LogSink> PanelLogRecorder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            history: Vec::new(),
            persisted: 0,
            last_sample: 0.0,
            interval: SAMPLE_INTERVAL_SECS,
            policy: FlushPolicy::default(),
        }
    }

    pub fn with_interval(mut self, interval_secs: f32) -> Self {
        self.interval = interval_secs;
        self
    }

    pub fn with_policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Strictly more than one interval since the last sample.
    pub fn is_due(&self, elapsed_secs: f32) -> bool {
        elapsed_secs - self.last_sample > self.interval
    }

    /// Sample every panel if the interval has elapsed, otherwise do nothing.
    pub fn poll(
        &mut self,
        elapsed_secs: f32,
        panels: &[Panel],
        light: Vec3,
    ) -> Option<SampleReport> {
        if !self.is_due(elapsed_secs) {
            return None;
        }
        Some(self.sample(elapsed_secs, panels, light))
    }

    /// Record one entry per panel in ascending ID order, then flush.
    pub fn sample(&mut self, elapsed_secs: f32, panels: &[Panel], light: Vec3) -> SampleReport {
        let mut ordered: Vec<&Panel> = panels.iter().collect();
        ordered.sort_by_key(|p| p.id);

        for panel in &ordered {
            self.history.push(PanelLogEntry {
                panel_id: panel.id,
                position: panel.position,
                timestamp: elapsed_secs,
                sunlight_strength: geometry::sunlight_strength(panel.position, light),
            });
        }
        self.last_sample = elapsed_secs;

        log::debug!(
            "sampled {} panels at {:.2}s (history {})",
            ordered.len(),
            elapsed_secs,
            self.history.len()
        );

        SampleReport {
            timestamp: elapsed_secs,
            recorded: ordered.len(),
            flush: self.flush(),
        }
    }

    fn flush(&mut self) -> FlushOutcome {
        let start = match self.policy {
            FlushPolicy::Incremental => self.persisted,
            FlushPolicy::FullHistory => 0,
        };
        match self.sink.append(&self.history[start..]) {
            Ok(lines) => {
                self.persisted = self.history.len();
                FlushOutcome::Written { lines }
            }
            Err(e) => {
                log::warn!(
                    "panel log flush failed, {} entries kept in memory: {}",
                    self.pending().len(),
                    e
                );
                FlushOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn history(&self) -> &[PanelLogEntry] {
        &self.history
    }

    /// Entries not yet written by a successful flush.
    pub fn pending(&self) -> &[PanelLogEntry] {
        &self.history[self.persisted..]
    }

    pub fn last_sample(&self) -> f32 {
        self.last_sample
    }

    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    pub fn overlay(&self, limit: usize, order: OverlayOrder) -> Vec<String> {
        let window = match order {
            OverlayOrder::Oldest => &self.history[..limit.min(self.history.len())],
            OverlayOrder::Newest => &self.history[self.history.len().saturating_sub(limit)..],
        };
        window.iter().map(PanelLogEntry::overlay_line).collect()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

use std::fs;

use glam::Vec3;

use solar_grid::error::{Error, Result};
use solar_grid::layout::default_panel_grid;
use solar_grid::recorder::*;
use solar_grid::types::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const OVERHEAD: Vec3 = Vec3::new(0.0, 10.5, 0.0);

/// Fails the next `failures` appends, then records lines like `MemorySink`.
#[derive(Default)]
struct FlakySink {
    failures: usize,
    lines: Vec<String>,
}

impl LogSink for FlakySink {
    fn append(&mut self, entries: &[PanelLogEntry]) -> Result<usize> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "sink unavailable",
            )));
        }
        self.lines.extend(entries.iter().map(|e| e.to_string()));
        Ok(entries.len())
    }
}

fn run_ticks<S: LogSink>(recorder: &mut PanelLogRecorder<S>, ticks: &[f32]) -> Vec<SampleReport> {
    let panels = default_panel_grid();
    ticks
        .iter()
        .filter_map(|&t| recorder.poll(t, &panels, OVERHEAD))
        .collect()
}

// ── Cadence ──

#[test]
fn test_sampling_cadence() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    let reports = run_ticks(&mut recorder, &[0.0, 1.0, 2.1, 3.0, 4.3]);

    assert_eq!(reports.len(), 2);
    assert_approx!(reports[0].timestamp, 2.1, 1e-6);
    assert_approx!(reports[1].timestamp, 4.3, 1e-6);
    assert!(reports.iter().all(|r| r.recorded == 9));
    assert_eq!(recorder.history().len(), 18);
}

#[test]
fn test_interval_is_strict() {
    let recorder = PanelLogRecorder::new(MemorySink::new());
    assert!(!recorder.is_due(0.0));
    assert!(!recorder.is_due(2.0));
    assert!(recorder.is_due(2.001));
}

#[test]
fn test_custom_interval() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new()).with_interval(0.5);
    let reports = run_ticks(&mut recorder, &[0.25, 0.6, 0.9, 1.2]);
    assert_eq!(reports.len(), 2);
    assert_approx!(recorder.last_sample(), 1.2, 1e-6);
}

// ── Entries ──

#[test]
fn test_entries_in_ascending_panel_order() {
    let mut panels = default_panel_grid();
    panels.reverse();
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    recorder.sample(2.5, &panels, OVERHEAD);
    recorder.sample(5.0, &panels, OVERHEAD);

    for batch in recorder.history().chunks(9) {
        let ids: Vec<u32> = batch.iter().map(|e| e.panel_id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<u32>>());
        assert!(batch.iter().all(|e| e.timestamp == batch[0].timestamp));
    }
}

#[test]
fn test_entry_values() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    recorder.sample(3.0, &default_panel_grid(), OVERHEAD);
    let history = recorder.history();

    let center = &history[4];
    assert_eq!(center.panel_id, 5);
    assert_eq!(center.position, Vec3::new(0.0, 0.5, 0.0));
    assert_approx!(center.sunlight_strength, 1.0, 1e-6);

    let corner = &history[0];
    assert_eq!(corner.position, Vec3::new(-2.0, 0.5, -2.0));
    assert_approx!(corner.sunlight_strength, 10.0 / 108f64.sqrt(), 1e-5);
    assert!(history.iter().all(|e| (0.0..=1.0).contains(&e.sunlight_strength)));
}

#[test]
fn test_entry_line_format() {
    let entry = PanelLogEntry {
        panel_id: 1,
        position: Vec3::new(-2.0, 0.5, -2.0),
        timestamp: 2.5,
        sunlight_strength: 1.0,
    };
    assert_eq!(
        entry.to_string(),
        "Panel ID: 1, Time: 2.5s, Position: (-2, 0.5, -2), Sunlight Strength: 1"
    );
    assert_eq!(
        entry.overlay_line(),
        "Panel ID: 1, Time: 2.50s, Pos:(-2.00, 0.50, -2.00), Sunlight: 1.00"
    );
}

// ── Flush policies ──

#[test]
fn test_incremental_flush_writes_only_new_entries() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    let reports = run_ticks(&mut recorder, &[2.1, 4.3, 6.5]);

    let written: Vec<FlushOutcome> = reports.into_iter().map(|r| r.flush).collect();
    assert_eq!(written, vec![FlushOutcome::Written { lines: 9 }; 3]);
    assert_eq!(recorder.sink().lines().len(), 27);
    assert!(recorder.pending().is_empty());
}

#[test]
fn test_full_history_flush_rewrites_everything() {
    let mut recorder =
        PanelLogRecorder::new(MemorySink::new()).with_policy(FlushPolicy::FullHistory);
    let reports = run_ticks(&mut recorder, &[2.1, 4.3, 6.5]);

    let lines: Vec<FlushOutcome> = reports.into_iter().map(|r| r.flush).collect();
    assert_eq!(
        lines,
        vec![
            FlushOutcome::Written { lines: 9 },
            FlushOutcome::Written { lines: 18 },
            FlushOutcome::Written { lines: 27 },
        ]
    );
    assert_eq!(recorder.sink().lines().len(), 54);
    assert_eq!(recorder.history().len(), 27);
}

#[test]
fn test_failed_flush_keeps_history_and_catches_up() {
    let sink = FlakySink {
        failures: 1,
        ..Default::default()
    };
    let mut recorder = PanelLogRecorder::new(sink);
    let reports = run_ticks(&mut recorder, &[2.1, 4.3]);

    assert!(matches!(reports[0].flush, FlushOutcome::Failed { .. }));
    assert_eq!(reports[1].flush, FlushOutcome::Written { lines: 18 });
    assert_eq!(recorder.history().len(), 18);
    assert_eq!(recorder.sink().lines.len(), 18);
    assert!(recorder.pending().is_empty());
}

#[test]
fn test_unopenable_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    // a directory cannot be opened for appending
    let mut recorder = PanelLogRecorder::new(FileSink::new(dir.path()));
    let report = recorder.sample(2.5, &default_panel_grid(), OVERHEAD);

    match report.flush {
        FlushOutcome::Failed { reason } => assert!(!reason.is_empty()),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(recorder.history().len(), 9);
    assert_eq!(recorder.pending().len(), 9);
}

// ── File sink ──

#[test]
fn test_file_sink_appends_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_LOG_PATH);
    fs::write(&path, "existing line\n").unwrap();

    let mut recorder = PanelLogRecorder::new(FileSink::new(&path));
    run_ticks(&mut recorder, &[2.1, 4.3]);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 19);
    assert_eq!(lines[0], "existing line");

    let prefix = "Panel ID: 1, Time: 2.1s, Position: (-2, 0.5, -2), Sunlight Strength: ";
    assert!(lines[1].starts_with(prefix), "line was {:?}", lines[1]);
    let strength: f32 = lines[1][prefix.len()..].parse().unwrap();
    assert_approx!(strength, 10.0 / 108f64.sqrt(), 1e-5);
    assert!(lines[18].starts_with("Panel ID: 9, Time: 4.3s"));
}

// ── Overlay ──

#[test]
fn test_overlay_empty_before_first_sample() {
    let recorder = PanelLogRecorder::new(MemorySink::new());
    assert!(recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Newest).is_empty());
    assert!(recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Oldest).is_empty());
}

#[test]
fn test_overlay_newest_shows_tail() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    run_ticks(&mut recorder, &[2.1, 4.3]);

    let lines = recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Newest);
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("Panel ID: 9, Time: 2.10s"));
    assert!(lines[1].starts_with("Panel ID: 1, Time: 4.30s"));
    assert!(lines[9].starts_with("Panel ID: 9, Time: 4.30s"));
}

#[test]
fn test_overlay_oldest_shows_head() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    run_ticks(&mut recorder, &[2.1, 4.3, 6.5]);

    let lines = recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Oldest);
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("Panel ID: 1, Time: 2.10s"));
    assert!(lines[9].starts_with("Panel ID: 1, Time: 4.30s"));
}

#[test]
fn test_overlay_short_history() {
    let mut recorder = PanelLogRecorder::new(MemorySink::new());
    run_ticks(&mut recorder, &[2.1]);
    assert_eq!(recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Newest).len(), 9);
    assert_eq!(
        recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Newest),
        recorder.overlay(OVERLAY_LIMIT, OverlayOrder::Oldest)
    );
}

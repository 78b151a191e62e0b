use std::fmt;
use std::time::Duration;

use super::tracking::TrackerSnapshot;

/// Final loss report, computed once from the tracker snapshot after both
/// loops have stopped.
///
/// Only frames sent at or after the first acknowledged sequence number are
/// counted: until the first ack arrives the peer is not yet synchronized,
/// and earlier losses say nothing about steady-state behaviour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkReport {
    pub duration: Duration,
    pub valid_sent: usize,
    pub received: usize,
    pub missed: usize,
    pub send_rate: f64,
    pub receive_rate: f64,
    pub drop_percent: f64,
}

impl LinkReport {
    pub fn from_snapshot(snapshot: &TrackerSnapshot) -> Self {
        // No ack ever arrived: report a zero window instead of dividing by it.
        let Some(first) = snapshot.first_received else {
            return Self::default();
        };

        let valid_sent = snapshot.sent.keys().filter(|&&seq| seq >= first).count();
        let missed = snapshot
            .sent
            .keys()
            .filter(|&&seq| seq >= first && !snapshot.received.contains(&seq))
            .count();
        let received = snapshot.received.len();

        let duration = match (snapshot.started_at, snapshot.stopped_at) {
            (Some(started), Some(stopped)) => stopped.saturating_duration_since(started),
            _ => Duration::ZERO,
        };

        let secs = duration.as_secs_f64();
        let send_rate = if secs > 0.0 { valid_sent as f64 / secs } else { 0.0 };
        let receive_rate = if secs > 0.0 { received as f64 / secs } else { 0.0 };
        let drop_percent = if valid_sent > 0 {
            missed as f64 / valid_sent as f64 * 100.0
        } else {
            0.0
        };

        Self {
            duration,
            valid_sent,
            received,
            missed,
            send_rate,
            receive_rate,
            drop_percent,
        }
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "link report")?;
        writeln!(f, "  runtime:   {:.2} s", self.duration.as_secs_f64())?;
        writeln!(
            f,
            "  sent:      {} frames ({:.2}/s)",
            self.valid_sent, self.send_rate
        )?;
        writeln!(
            f,
            "  received:  {} acks ({:.2}/s)",
            self.received, self.receive_rate
        )?;
        writeln!(f, "  missed:    {} frames", self.missed)?;
        write!(f, "  drop rate: {:.2}%", self.drop_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn snapshot_with(
        sent: &[u32],
        received: &[u32],
        first_received: Option<u32>,
        duration: Duration,
    ) -> TrackerSnapshot {
        let base = Instant::now();
        TrackerSnapshot {
            sent: sent.iter().map(|&seq| (seq, base)).collect(),
            received: received.iter().copied().collect(),
            first_received,
            started_at: first_received.map(|_| base),
            stopped_at: first_received.map(|_| base + duration),
        }
    }

    #[test]
    fn test_windowing() {
        let snapshot = snapshot_with(
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            &[3, 5, 7],
            Some(3),
            Duration::from_secs(1),
        );
        let report = LinkReport::from_snapshot(&snapshot);

        assert_eq!(report.valid_sent, 7);
        assert_eq!(report.received, 3);
        assert_eq!(report.missed, 4);
        assert!((report.drop_percent - 400.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_from_duration() {
        let snapshot = snapshot_with(&[0, 1, 2, 3], &[0, 1, 2, 3], Some(0), Duration::from_secs(2));
        let report = LinkReport::from_snapshot(&snapshot);

        assert_eq!(report.duration, Duration::from_secs(2));
        assert!((report.send_rate - 2.0).abs() < 1e-9);
        assert!((report.receive_rate - 2.0).abs() < 1e-9);
        assert_eq!(report.missed, 0);
        assert_eq!(report.drop_percent, 0.0);
    }

    #[test]
    fn test_no_acks_is_degenerate_not_an_error() {
        let snapshot = snapshot_with(&[0, 1, 2], &[], None, Duration::ZERO);
        let report = LinkReport::from_snapshot(&snapshot);
        assert_eq!(report, LinkReport::default());
    }

    #[test]
    fn test_zero_duration_yields_zero_rates() {
        let snapshot = snapshot_with(&[0], &[0], Some(0), Duration::ZERO);
        let report = LinkReport::from_snapshot(&snapshot);
        assert_eq!(report.send_rate, 0.0);
        assert_eq!(report.receive_rate, 0.0);
        assert_eq!(report.valid_sent, 1);
    }

    #[test]
    fn test_display_has_single_trailing_line() {
        let snapshot = snapshot_with(&[0, 1], &[0], Some(0), Duration::from_secs(1));
        let rendered = LinkReport::from_snapshot(&snapshot).to_string();
        assert!(rendered.starts_with("link report"));
        assert!(rendered.contains("drop rate: 50.00%"));
        assert!(!rendered.ends_with('\n'));
    }
}

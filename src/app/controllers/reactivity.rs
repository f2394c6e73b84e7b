use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::app::domain::{DocumentId, DocumentKind};
use crate::app::domain::settings::DEBOUNCE_KEY;
use crate::app::infrastructure::host::ConfigSource;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounce window from `hexfield.debounceMs`, or the default when absent or unparsable.
pub fn debounce_window(config: &impl ConfigSource) -> Duration {
    config
        .get_string(DEBOUNCE_KEY)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_DEBOUNCE)
}

#[derive(Debug, Clone, Copy)]
struct PendingScan {
    deadline: Instant,
    sequence: u64,
}

/// Cancelable deferred re-scans, at most one per document.
///
/// Time is passed in by the caller; nothing here reads a clock.
pub struct DebounceTimer {
    window: Duration,
    pending: BTreeMap<DocumentId, PendingScan>,
    next_sequence: u64,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Applies to schedules made from now on.
    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// (Re)start the quiet period for `doc`, canceling any earlier schedule.
    pub fn schedule(&mut self, doc: DocumentId, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.next_sequence += 1;
        let previous = self.pending.insert(
            doc,
            PendingScan {
                deadline,
                sequence: self.next_sequence,
            },
        );
        if previous.is_some() {
            tracing::trace!(doc = ?doc, "Rescheduled pending scan");
        }
        deadline
    }

    pub fn cancel(&mut self, doc: DocumentId) -> bool {
        self.pending.remove(&doc).is_some()
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn is_pending(&self, doc: DocumentId) -> bool {
        self.pending.contains_key(&doc)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every document whose deadline has passed, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<DocumentId> {
        let mut due: Vec<(DocumentId, PendingScan)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(doc, p)| (*doc, *p))
            .collect();
        due.sort_by_key(|(_, p)| (p.deadline, p.sequence));
        for (doc, _) in &due {
            self.pending.remove(doc);
        }
        due.into_iter().map(|(doc, _)| doc).collect()
    }
}

/// What the coordinator should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Ignore,
    /// Decorate synchronously with the event.
    DecorateNow,
    /// A re-scan will be due at the given instant.
    Scheduled(Instant),
    /// The document left the specialized kind: drop its decorations.
    Clear,
}

/// Decides when decoration runs: immediately on activation or promotion,
/// debounced after edits.
pub struct ReactivityController {
    timer: DebounceTimer,
}

impl ReactivityController {
    pub fn new(window: Duration) -> Self {
        Self {
            timer: DebounceTimer::new(window),
        }
    }

    pub fn timer(&self) -> &DebounceTimer {
        &self.timer
    }

    pub fn set_window(&mut self, window: Duration) {
        self.timer.set_window(window);
    }

    pub fn on_activated(&self, kind: Option<DocumentKind>) -> Reaction {
        match kind {
            Some(DocumentKind::Specialized) => Reaction::DecorateNow,
            _ => Reaction::Ignore,
        }
    }

    pub fn on_promoted(&self, doc: DocumentId) -> Reaction {
        tracing::debug!(doc = ?doc, "Promoted, decorating now");
        Reaction::DecorateNow
    }

    pub fn on_demoted(&mut self, doc: DocumentId) -> Reaction {
        if self.timer.cancel(doc) {
            tracing::debug!(doc = ?doc, "Demoted, canceled pending scan");
        }
        Reaction::Clear
    }

    pub fn on_changed(&mut self, doc: DocumentId, kind: Option<DocumentKind>, now: Instant) -> Reaction {
        match kind {
            Some(DocumentKind::Specialized) => {
                let deadline = self.timer.schedule(doc, now);
                tracing::trace!(doc = ?doc, ?deadline, "Scheduled scan");
                Reaction::Scheduled(deadline)
            }
            _ => Reaction::Ignore,
        }
    }

    pub fn due(&mut self, now: Instant) -> Vec<DocumentId> {
        self.timer.take_due(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_deadline()
    }

    pub fn shutdown(&mut self) {
        let canceled = self.timer.cancel_all();
        if canceled > 0 {
            tracing::debug!(canceled, "Canceled pending scans on shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::HexfieldSettings;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_burst_coalesces_to_one_scan_after_last_edit() {
        let mut timer = DebounceTimer::new(DEFAULT_DEBOUNCE);
        let t0 = Instant::now();
        let doc = DocumentId(1);

        timer.schedule(doc, t0);
        timer.schedule(doc, t0 + 100 * MS);
        let last = timer.schedule(doc, t0 + 300 * MS);
        assert_eq!(last, t0 + 800 * MS);
        assert_eq!(timer.pending_count(), 1);

        assert!(timer.take_due(t0 + 500 * MS).is_empty());
        assert!(timer.take_due(t0 + 799 * MS).is_empty());
        assert_eq!(timer.take_due(t0 + 800 * MS), vec![doc]);
        assert!(timer.take_due(t0 + 2000 * MS).is_empty());
    }

    #[test]
    fn test_documents_debounce_independently() {
        let mut timer = DebounceTimer::new(100 * MS);
        let t0 = Instant::now();
        let (a, b) = (DocumentId(1), DocumentId(2));

        timer.schedule(b, t0);
        timer.schedule(a, t0 + 10 * MS);
        assert_eq!(timer.next_deadline(), Some(t0 + 100 * MS));
        assert_eq!(timer.take_due(t0 + 100 * MS), vec![b]);
        assert!(timer.is_pending(a));
        assert_eq!(timer.take_due(t0 + 200 * MS), vec![a]);
        assert_eq!(timer.next_deadline(), None);
    }

    #[test]
    fn test_due_order_is_by_deadline() {
        let mut timer = DebounceTimer::new(100 * MS);
        let t0 = Instant::now();
        timer.schedule(DocumentId(9), t0);
        timer.schedule(DocumentId(3), t0 + 5 * MS);
        timer.schedule(DocumentId(5), t0 + MS);
        assert_eq!(
            timer.take_due(t0 + 1000 * MS),
            vec![DocumentId(9), DocumentId(5), DocumentId(3)]
        );
    }

    #[test]
    fn test_cancel() {
        let mut timer = DebounceTimer::new(100 * MS);
        let t0 = Instant::now();
        timer.schedule(DocumentId(1), t0);
        timer.schedule(DocumentId(2), t0);
        assert!(timer.cancel(DocumentId(1)));
        assert!(!timer.cancel(DocumentId(1)));
        assert_eq!(timer.cancel_all(), 1);
        assert!(timer.take_due(t0 + 1000 * MS).is_empty());
    }

    #[test]
    fn test_window_from_config() {
        let settings = HexfieldSettings {
            debounce_ms: 120,
            ..Default::default()
        };
        assert_eq!(debounce_window(&settings), 120 * MS);
        assert_eq!(debounce_window(&HexfieldSettings::default()), DEFAULT_DEBOUNCE);
    }

    #[test]
    fn test_reactions() {
        let mut controller = ReactivityController::new(DEFAULT_DEBOUNCE);
        let t0 = Instant::now();
        let doc = DocumentId(4);

        assert_eq!(controller.on_activated(Some(DocumentKind::Specialized)), Reaction::DecorateNow);
        assert_eq!(controller.on_activated(Some(DocumentKind::Generic)), Reaction::Ignore);
        assert_eq!(controller.on_activated(None), Reaction::Ignore);
        assert_eq!(controller.on_promoted(doc), Reaction::DecorateNow);

        assert_eq!(
            controller.on_changed(doc, Some(DocumentKind::Specialized), t0),
            Reaction::Scheduled(t0 + DEFAULT_DEBOUNCE)
        );
        assert_eq!(controller.on_changed(doc, Some(DocumentKind::Generic), t0), Reaction::Ignore);
        assert!(controller.timer().is_pending(doc));

        assert_eq!(controller.on_demoted(doc), Reaction::Clear);
        assert!(!controller.timer().is_pending(doc));
    }

    #[test]
    fn test_scheduled_deadline_tracks_latest_change() {
        let mut controller = ReactivityController::new(DEFAULT_DEBOUNCE);
        let t0 = Instant::now();
        let doc = DocumentId(9);

        let Reaction::Scheduled(first) = controller.on_changed(doc, Some(DocumentKind::Specialized), t0) else {
            panic!("expected a scheduled scan");
        };
        let later = t0 + Duration::from_millis(120);
        let Reaction::Scheduled(second) = controller.on_changed(doc, Some(DocumentKind::Specialized), later) else {
            panic!("expected a scheduled scan");
        };
        assert_eq!(second, later + DEFAULT_DEBOUNCE);
        assert!(second > first);
        assert_eq!(controller.next_deadline(), Some(second));
        assert!(controller.due(first).is_empty());
        assert_eq!(controller.due(second), vec![doc]);
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut controller = ReactivityController::new(DEFAULT_DEBOUNCE);
        let t0 = Instant::now();
        controller.on_changed(DocumentId(1), Some(DocumentKind::Specialized), t0);
        controller.on_changed(DocumentId(2), Some(DocumentKind::Specialized), t0);
        controller.shutdown();
        assert_eq!(controller.next_deadline(), None);
        assert!(controller.due(t0 + 10 * DEFAULT_DEBOUNCE).is_empty());
    }
}

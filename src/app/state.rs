use std::time::Instant;

use super::controllers::classification::{DocumentKindClassifier, Transition, Trigger};
use super::controllers::decoration::DecorationEngine;
use super::controllers::reactivity::{Reaction, ReactivityController, debounce_window};
use super::domain::{DocumentId, DocumentKind, Event, ViewId};
use super::infrastructure::error::absorb;
use super::infrastructure::host::Host;
use super::services::proximity::{Calendar, SystemCalendar};

/// Main coordinator: routes host events, in arrival order, through
/// classification, reactivity and decoration.
pub struct HexfieldState<C: Calendar = SystemCalendar> {
    engine: DecorationEngine,
    classifier: DocumentKindClassifier,
    reactivity: ReactivityController,
    calendar: C,
    shut_down: bool,
}

impl HexfieldState<SystemCalendar> {
    pub fn with_system_calendar<H: Host>(host: &mut H) -> Self {
        Self::new(host, SystemCalendar)
    }
}

impl<C: Calendar> HexfieldState<C> {
    pub fn new<H: Host>(host: &mut H, calendar: C) -> Self {
        Self {
            engine: DecorationEngine::new(host),
            classifier: DocumentKindClassifier::new(),
            reactivity: ReactivityController::new(debounce_window(&*host)),
            calendar,
            shut_down: false,
        }
    }

    pub fn engine(&self) -> &DecorationEngine {
        &self.engine
    }

    pub fn reactivity(&self) -> &ReactivityController {
        &self.reactivity
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Evaluate documents that were already open before the coordinator existed.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        for doc in host.open_documents() {
            self.classifier.evaluate(host, doc, Trigger::Startup);
        }
        for view in host.visible_views() {
            if self.view_is_specialized(host, view) {
                self.decorate_view(host, view);
            }
        }
    }

    /// When the host should deliver the next `Event::Tick`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reactivity.next_deadline()
    }

    pub fn handle<H: Host>(&mut self, host: &mut H, event: Event, now: Instant) {
        if self.shut_down {
            tracing::trace!(?event, "Ignoring event after shutdown");
            return;
        }
        match event {
            Event::Opened(doc) => {
                let eval = self.classifier.evaluate(host, doc, Trigger::Opened);
                if eval.transition == Transition::Promoted {
                    let reaction = self.reactivity.on_promoted(doc);
                    self.react(host, doc, None, reaction);
                }
            }
            Event::Changed(doc) => self.handle_change(host, doc, now),
            Event::Activated(Some(view)) => self.handle_activation(host, view),
            Event::Activated(None) => {}
            Event::ConfigChanged => self.handle_config_change(host),
            Event::Tick => {
                for doc in self.reactivity.due(now) {
                    self.fire_scheduled(host, doc);
                }
            }
        }
    }

    fn handle_change<H: Host>(&mut self, host: &mut H, doc: DocumentId, now: Instant) {
        let eval = self.classifier.evaluate(host, doc, Trigger::Changed);
        let reaction = match eval.transition {
            Transition::Promoted => self.reactivity.on_promoted(doc),
            Transition::Demoted => self.reactivity.on_demoted(doc),
            Transition::Unchanged => self.reactivity.on_changed(doc, eval.kind, now),
        };
        self.react(host, doc, None, reaction);
    }

    fn handle_activation<H: Host>(&mut self, host: &mut H, view: ViewId) {
        let Some(doc) = absorb(host.view_document(view), "activate view") else {
            return;
        };
        let eval = self.classifier.evaluate(host, doc, Trigger::Activated);
        if eval.transition == Transition::Promoted {
            // Repaint every view of the document, this one included.
            let reaction = self.reactivity.on_promoted(doc);
            self.react(host, doc, None, reaction);
        } else {
            let reaction = self.reactivity.on_activated(eval.kind);
            self.react(host, doc, Some(view), reaction);
        }
    }

    fn handle_config_change<H: Host>(&mut self, host: &mut H) {
        self.engine.refresh_colors(host);
        self.reactivity.set_window(debounce_window(&*host));
        for view in host.visible_views() {
            if self.view_is_specialized(host, view) {
                self.decorate_view(host, view);
            }
        }
    }

    /// A debounced scan came due. The document may have closed or changed kind since.
    fn fire_scheduled<H: Host>(&mut self, host: &mut H, doc: DocumentId) {
        let still_specialized = absorb(host.document_info(doc), "scheduled scan")
            .is_some_and(|info| info.language.kind() == Some(DocumentKind::Specialized));
        if !still_specialized {
            tracing::debug!(doc = ?doc, "Dropping scheduled scan");
            return;
        }
        self.decorate_document(host, doc);
    }

    fn react<H: Host>(&self, host: &mut H, doc: DocumentId, view: Option<ViewId>, reaction: Reaction) {
        match reaction {
            Reaction::DecorateNow => match view {
                Some(view) => self.decorate_view(host, view),
                None => self.decorate_document(host, doc),
            },
            Reaction::Clear => {
                for view in host.views_of(doc) {
                    absorb(self.engine.clear(host, view), "clear decorations");
                }
            }
            Reaction::Scheduled(deadline) => {
                tracing::trace!(doc = ?doc, ?deadline, "Scan pending");
            }
            Reaction::Ignore => {}
        }
    }

    fn view_is_specialized<H: Host>(&self, host: &H, view: ViewId) -> bool {
        host.view_document(view)
            .and_then(|doc| host.document_info(doc))
            .is_ok_and(|info| info.language.kind() == Some(DocumentKind::Specialized))
    }

    fn decorate_document<H: Host>(&self, host: &mut H, doc: DocumentId) {
        let views = host.views_of(doc);
        if views.is_empty() {
            tracing::debug!(doc = ?doc, "No visible view, nothing to decorate");
        }
        for view in views {
            self.decorate_view(host, view);
        }
    }

    fn decorate_view<H: Host>(&self, host: &mut H, view: ViewId) {
        absorb(self.engine.decorate(host, view, &self.calendar), "decorate");
    }

    /// Cancel pending scans and release every style. Idempotent.
    pub fn shutdown<H: Host>(&mut self, host: &mut H) {
        self.reactivity.shutdown();
        self.engine.dispose(host);
        self.shut_down = true;
    }
}

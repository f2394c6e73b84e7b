use std::collections::BTreeMap;

use crate::app::domain::{ColorClass, StyleHandle, TextRange, ViewId};
use crate::app::infrastructure::error::HostError;
use crate::app::infrastructure::host::{ConfigSource, DocumentSource, StyleSink};
use crate::app::services::colors::resolve_style;
use crate::app::services::proximity::Calendar;
use crate::app::services::text_ops::TextIndex;
use crate::app::services::tokens::extract_indexed;

/// One set of allocated style handles, valid until the next refresh or disposal.
struct StyleEpoch {
    number: u64,
    handles: Vec<(ColorClass, StyleHandle)>,
}

/// Outcome of one `decorate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecorationPass {
    pub tokens: usize,
    /// Classes submitted to the host, including those cleared with an empty list.
    pub classes_submitted: usize,
}

/// Scans a view's document and applies colored ranges, one style handle per color class.
///
/// Owns the handle lifecycle: every epoch's handles are released before the
/// next epoch's are created, so no stale style stays attached to a view.
pub struct DecorationEngine {
    epoch: Option<StyleEpoch>,
    epochs_started: u64,
}

impl DecorationEngine {
    pub fn new<H: StyleSink + ConfigSource>(host: &mut H) -> Self {
        let mut engine = Self {
            epoch: None,
            epochs_started: 0,
        };
        engine.begin_epoch(host);
        engine
    }

    /// Current epoch number, or `None` once disposed.
    pub fn epoch(&self) -> Option<u64> {
        self.epoch.as_ref().map(|e| e.number)
    }

    pub fn is_disposed(&self) -> bool {
        self.epoch.is_none()
    }

    pub fn handle(&self, class: ColorClass) -> Option<StyleHandle> {
        self.epoch
            .as_ref()?
            .handles
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, h)| *h)
    }

    fn begin_epoch<H: StyleSink + ConfigSource>(&mut self, host: &mut H) {
        self.epochs_started += 1;
        let handles = ColorClass::all()
            .iter()
            .map(|class| {
                let style = resolve_style(*class, &*host);
                (*class, host.create_style(&style))
            })
            .collect();
        self.epoch = Some(StyleEpoch {
            number: self.epochs_started,
            handles,
        });
        tracing::debug!(epoch = self.epochs_started, "Allocated color classes");
    }

    fn release_epoch<H: StyleSink>(&mut self, host: &mut H) {
        if let Some(epoch) = self.epoch.take() {
            for (_, handle) in epoch.handles {
                host.release_style(handle);
            }
            tracing::debug!(epoch = epoch.number, "Released color classes");
        }
    }

    /// Re-scan the document shown in `view` and replace all its decorations.
    ///
    /// "Today" is read once, so every due date in the pass shares one reference day.
    pub fn decorate<H: DocumentSource + StyleSink>(
        &self,
        host: &mut H,
        view: ViewId,
        calendar: &impl Calendar,
    ) -> Result<DecorationPass, HostError> {
        let Some(epoch) = &self.epoch else {
            tracing::debug!(view = ?view, "Engine disposed, skipping decorate");
            return Ok(DecorationPass::default());
        };

        let today = calendar.today();
        let doc = host.view_document(view)?;
        let text = host.document_text(doc)?;
        let index = TextIndex::new(&text);
        let tokens = extract_indexed(&index, today);

        let mut groups: BTreeMap<ColorClass, Vec<TextRange>> = BTreeMap::new();
        for token in &tokens {
            if let Some(class) = ColorClass::of(token) {
                groups.entry(class).or_default().push(index.range(token.span));
            }
        }

        // A failed submission ends the pass. Classes already sent keep their new
        // ranges; the rest keep the previous ones until the next pass.
        for (class, handle) in &epoch.handles {
            let ranges = groups.remove(class).unwrap_or_default();
            host.set_decorations(view, *handle, &ranges)?;
        }

        tracing::debug!(view = ?view, doc = ?doc, tokens = tokens.len(), %today, "Decorated view");
        Ok(DecorationPass {
            tokens: tokens.len(),
            classes_submitted: epoch.handles.len(),
        })
    }

    /// Submit an empty list for every class on `view`.
    pub fn clear<H: StyleSink>(&self, host: &mut H, view: ViewId) -> Result<(), HostError> {
        if let Some(epoch) = &self.epoch {
            for (_, handle) in &epoch.handles {
                host.set_decorations(view, *handle, &[])?;
            }
        }
        Ok(())
    }

    /// Start a new epoch from fresh configuration. Callers re-decorate visible views.
    pub fn refresh_colors<H: StyleSink + ConfigSource>(&mut self, host: &mut H) {
        self.release_epoch(host);
        self.begin_epoch(host);
    }

    /// Release every handle. Idempotent; `decorate` is a no-op afterwards.
    pub fn dispose<H: StyleSink>(&mut self, host: &mut H) {
        self.release_epoch(host);
    }
}

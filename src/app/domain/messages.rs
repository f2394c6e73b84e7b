use super::document::{DocumentId, ViewId};

/// Host notifications, processed strictly in arrival order by `HexfieldState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Documents
    Opened(DocumentId),
    Changed(DocumentId),

    // Views. `None` when focus left every editor.
    Activated(Option<ViewId>),

    // Settings
    ConfigChanged,

    // Timer: the host delivers this at or after `HexfieldState::next_deadline`.
    Tick,
}

use serde::Serialize;

/// Broadcast by the dialogs after a successful save or delete so the home
/// view can refresh what it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ListModification {
    Photos,
    /// `content` is false when the modified tag no longer exists.
    Tags { content: bool },
}

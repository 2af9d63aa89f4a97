pub mod delete_dialog;
pub mod photo_dialog;
pub mod popup_service;
pub mod tag_dialog;

pub use delete_dialog::{DeleteDialog, DeleteTarget};
pub use photo_dialog::PhotoDialog;
pub use popup_service::PopupService;
pub use tag_dialog::TagDialog;

use crate::events::ListModification;
use crate::message::AppSuccess;

/// The dialogs the application opens. Only one is open at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Dialog {
    PhotoEdit(PhotoDialog),
    TagEdit(TagDialog),
    DeleteConfirm(DeleteDialog),
}

impl Dialog {
    pub fn title(&self) -> String {
        match self {
            Dialog::PhotoEdit(d) if d.photo.id.is_some() => "Edit photo".to_string(),
            Dialog::PhotoEdit(_) => "Upload photo".to_string(),
            Dialog::TagEdit(d) if d.tag.id.is_some() => "Edit tag".to_string(),
            Dialog::TagEdit(_) => "Create tag".to_string(),
            Dialog::DeleteConfirm(d) => format!("Delete {}", d.target.kind()),
        }
    }
}

/// Result of a successful save or delete: what the backend returned, the
/// refresh the home view should run, and the notice to show.
#[derive(Debug, PartialEq)]
pub struct Saved<T> {
    pub entity: T,
    pub event: ListModification,
    pub notice: AppSuccess,
}

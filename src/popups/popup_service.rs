use std::sync::Arc;

use futures_util::future::OptionFuture;
use parking_lot::Mutex;
use tracing::debug;

use super::{DeleteDialog, DeleteTarget, Dialog, PhotoDialog, TagDialog};
use crate::error::{Error, Result};
use crate::models::tag::ROOT_TAG_ID;
use crate::models::Tag;
use crate::services::{Backend, PhotoService, TagService};

/// Opens dialogs after fetching what they edit. Holds the one open dialog
/// until it is closed; asking to open another meanwhile hands back the open one.
pub struct PopupService<B: ?Sized> {
    backend: Arc<B>,
    open: Mutex<Option<Dialog>>,
}

impl<B: Backend + ?Sized> PopupService<B> {
    pub fn new(backend: Arc<B>) -> Self {
        PopupService {
            backend,
            open: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Option<Dialog> {
        self.open.lock().clone()
    }

    pub fn is_open(&self) -> bool {
        self.open.lock().is_some()
    }

    /// Closes the open dialog, whether it was saved or dismissed.
    pub fn close(&self) -> Option<Dialog> {
        let closed = self.open.lock().take();
        if let Some(dialog) = &closed {
            debug!(title = %dialog.title(), "dialog closed");
        }
        closed
    }

    /// Edit form for photo `id`, or an upload form when `id` is `None`.
    pub async fn open_photo(&self, id: Option<i64>, tag_selected: Option<Tag>) -> Result<Dialog> {
        if let Some(open) = self.current() {
            return Ok(open);
        }

        let dialog = match id {
            Some(id) => {
                let mut photo = self.backend.find_photo(id).await?;
                photo.truncate_date_for_form();
                PhotoDialog::new(photo, tag_selected)
            }
            None => PhotoDialog::blank(tag_selected),
        };
        Ok(self.install(Dialog::PhotoEdit(dialog)))
    }

    /// Edit form for tag `id` (or a new tag) under `parent_tag_id`.
    ///
    /// The root is never fetched: `0` for either id means "none".
    pub async fn open_tag(&self, id: Option<i64>, parent_tag_id: Option<i64>) -> Result<Dialog> {
        if let Some(open) = self.current() {
            return Ok(open);
        }

        let id = id.filter(|id| *id != ROOT_TAG_ID);
        let parent_tag_id = parent_tag_id.filter(|id| *id != ROOT_TAG_ID);

        let find_tag: OptionFuture<_> = id.map(|id| self.backend.find_tag(id)).into();
        let find_parent: OptionFuture<_> = parent_tag_id.map(|id| self.backend.find_tag(id)).into();

        let (tag, parent_tag) = match tokio::join!(find_tag, find_parent) {
            (Some(tag), Some(parent)) => (tag?, Some(parent?)),
            (Some(tag), None) => (tag?, None),
            (None, Some(parent)) => (Tag::default(), Some(parent?)),
            (None, None) => (Tag::default(), None),
        };

        Ok(self.install(Dialog::TagEdit(TagDialog::new(tag, parent_tag))))
    }

    pub async fn open_delete_photo(&self, id: i64) -> Result<Dialog> {
        if let Some(open) = self.current() {
            return Ok(open);
        }

        let photo = self.backend.find_photo(id).await?;
        Ok(self.install(Dialog::DeleteConfirm(DeleteDialog::new(DeleteTarget::Photo(photo)))))
    }

    pub async fn open_delete_tag(&self, id: i64) -> Result<Dialog> {
        if id == ROOT_TAG_ID {
            return Err(Error::RootTagNotPersisted);
        }
        if let Some(open) = self.current() {
            return Ok(open);
        }

        let tag = self.backend.find_tag(id).await?;
        Ok(self.install(Dialog::DeleteConfirm(DeleteDialog::new(DeleteTarget::Tag(tag)))))
    }

    /// First dialog to finish loading wins the slot.
    fn install(&self, dialog: Dialog) -> Dialog {
        let mut open = self.open.lock();
        match open.as_ref() {
            Some(existing) => existing.clone(),
            None => {
                debug!(title = %dialog.title(), "dialog opened");
                *open = Some(dialog.clone());
                dialog
            }
        }
    }
}

use std::path::Path;

use tracing::debug;

use super::Saved;
use crate::error::{Error, Result};
use crate::events::ListModification;
use crate::message::{AppSuccess, EntityKind};
use crate::models::{EntityRef, Photo, Tag};
use crate::services::{Backend, PhotoService, TagService};
use crate::utils::upload::{PhotoForm, PhotoUpload};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotoDialog {
    pub photo: Photo,
    /// Tag the user was browsing when the dialog opened.
    pub tag_selected: Option<Tag>,
    pub tag_options: Vec<Tag>,
}

impl PhotoDialog {
    pub fn new(photo: Photo, tag_selected: Option<Tag>) -> Self {
        PhotoDialog {
            photo,
            tag_selected,
            tag_options: Vec::new(),
        }
    }

    /// A blank upload form, already tagged with the browsed tag unless that is
    /// the root.
    pub fn blank(tag_selected: Option<Tag>) -> Self {
        let mut photo = Photo::default();
        if let Some(tag) = tag_selected.as_ref().filter(|tag| !tag.is_root()) {
            photo.tags.push(EntityRef::from(tag));
        }
        PhotoDialog::new(photo, tag_selected)
    }

    pub async fn load_options<B: Backend + ?Sized>(&mut self, backend: &B) -> Result<()> {
        self.tag_options = backend.query_tags(None).await?.items;
        debug!(options = self.tag_options.len(), "photo dialog options loaded");
        Ok(())
    }

    /// Adds or removes a tag on the edited photo.
    pub fn toggle_tag(&mut self, tag: &Tag) {
        let reference = EntityRef::from(tag);
        match self.photo.tags.iter().position(|t| *t == reference) {
            Some(i) => {
                self.photo.tags.remove(i);
            }
            None => self.photo.tags.push(reference),
        }
    }

    /// Creating needs an image; updating keeps the stored one when `image` is
    /// `None`.
    pub async fn save<B: Backend + ?Sized>(
        &self,
        backend: &B,
        image: Option<PhotoUpload>,
        user_id: i64,
    ) -> Result<Saved<Photo>> {
        if self.photo.id.is_none() && image.is_none() {
            return Err(Error::IncompleteForm("an image"));
        }
        if self.photo.tags.is_empty() {
            return Err(Error::IncompleteForm("at least one tag"));
        }

        let form = PhotoForm {
            photo_id: self.photo.id,
            image,
            tag_ids: self.photo.tag_ids(),
            user_id,
        };
        let notice = match form.photo_id {
            Some(_) => AppSuccess::Updated(EntityKind::Photo),
            None => AppSuccess::UploadedPhoto,
        };
        let entity = backend.save_photo(form).await?;

        Ok(Saved {
            entity,
            event: ListModification::Photos,
            notice,
        })
    }

    /// Uploads the file at `path`. The extension is checked before the file is
    /// read, so a disallowed file never reaches the backend.
    pub async fn save_file<B: Backend + ?Sized>(
        &self,
        backend: &B,
        path: impl AsRef<Path>,
        user_id: i64,
    ) -> Result<Saved<Photo>> {
        let image = PhotoUpload::from_path(path).await?;
        self.save(backend, Some(image), user_id).await
    }
}

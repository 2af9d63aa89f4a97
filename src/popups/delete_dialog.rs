use super::Saved;
use crate::error::{Error, Result};
use crate::events::ListModification;
use crate::message::{AppSuccess, EntityKind};
use crate::models::{Photo, Tag};
use crate::services::{Backend, PhotoService, TagService};

#[derive(Clone, Debug, PartialEq)]
pub enum DeleteTarget {
    Photo(Photo),
    Tag(Tag),
}

impl DeleteTarget {
    pub fn kind(&self) -> EntityKind {
        match self {
            DeleteTarget::Photo(_) => EntityKind::Photo,
            DeleteTarget::Tag(_) => EntityKind::Tag,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeleteDialog {
    pub target: DeleteTarget,
}

impl DeleteDialog {
    pub fn new(target: DeleteTarget) -> Self {
        DeleteDialog { target }
    }

    pub fn prompt(&self) -> String {
        match &self.target {
            DeleteTarget::Photo(photo) => format!(
                "Are you sure you want to delete photo {}?",
                photo.original_file_name().unwrap_or_default()
            ),
            DeleteTarget::Tag(tag) => format!(
                "Are you sure you want to delete tag {} with all its sub-tags?",
                tag.label()
            ),
        }
    }

    pub async fn confirm<B: Backend + ?Sized>(&self, backend: &B) -> Result<Saved<DeleteTarget>> {
        let event = match &self.target {
            DeleteTarget::Photo(photo) => {
                let id = photo
                    .id
                    .ok_or_else(|| Error::NotFound("unsaved photo".to_string()))?;
                backend.delete_photo(id).await?;
                ListModification::Photos
            }
            DeleteTarget::Tag(tag) => {
                backend.delete_tag(tag.key()).await?;
                ListModification::Tags { content: false }
            }
        };

        Ok(Saved {
            entity: self.target.clone(),
            event,
            notice: AppSuccess::Deleted(self.target.kind()),
        })
    }
}

use tracing::debug;

use super::Saved;
use crate::error::Result;
use crate::events::ListModification;
use crate::message::{AppSuccess, EntityKind};
use crate::models::{Account, EntityRef, Photo, Tag, User};
use crate::services::{Backend, PhotoService, TagService};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagDialog {
    pub tag: Tag,
    /// Preselected parent, e.g. the tag the user is browsing.
    pub parent_tag: Option<Tag>,
    pub parent_candidates: Vec<Tag>,
    /// Photos the tag can be attached to.
    pub photo_options: Vec<Photo>,
}

impl TagDialog {
    pub fn new(tag: Tag, parent_tag: Option<Tag>) -> Self {
        TagDialog {
            tag,
            parent_tag,
            parent_candidates: Vec::new(),
            photo_options: Vec::new(),
        }
    }

    /// Loads every tag as a parent candidate and every photo as an option,
    /// and falls back to the preselected parent when the tag has none of its
    /// own.
    pub async fn load_options<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        account: Option<&Account>,
    ) -> Result<()> {
        let own_id = self.tag.id;
        let (tags, photos) = tokio::join!(backend.query_tags(None), backend.query_photos(None));
        self.photo_options = photos?.items;
        self.parent_candidates = tags?
            .items
            .into_iter()
            .filter(|candidate| own_id.is_none() || candidate.id != own_id)
            .collect();

        if self.tag.parent_tag.is_none() {
            if let Some(parent) = &self.parent_tag {
                self.tag.parent_tag = Some(Box::new(parent.clone()));
            }
        }
        if let Some(account) = account {
            self.tag.user = Some(User::from(account));
        }
        debug!(
            candidates = self.parent_candidates.len(),
            photos = self.photo_options.len(),
            "tag dialog options loaded"
        );
        Ok(())
    }

    /// Attaches or detaches a saved photo. Returns whether it is attached now.
    pub fn toggle_photo(&mut self, photo: &Photo) -> bool {
        let Some(id) = photo.id else {
            return false;
        };
        match self.tag.photos.iter().position(|p| p.id == id) {
            Some(i) => {
                self.tag.photos.remove(i);
                false
            }
            None => {
                self.tag.photos.push(EntityRef { id });
                true
            }
        }
    }

    pub async fn save<B: Backend + ?Sized>(&self, backend: &B) -> Result<Saved<Tag>> {
        let mut tag = self.tag.clone();
        // top-level tags hang off the synthetic root, which has no backend row
        if tag.parent_tag.as_ref().is_some_and(|parent| parent.is_root()) {
            tag.parent_tag = None;
        }

        let (entity, notice) = match tag.id {
            Some(_) => (backend.update_tag(&tag).await?, AppSuccess::Updated(EntityKind::Tag)),
            None => (backend.create_tag(&tag).await?, AppSuccess::Created(EntityKind::Tag)),
        };

        Ok(Saved {
            entity,
            event: ListModification::Tags { content: true },
            notice,
        })
    }
}

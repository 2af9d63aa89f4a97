use std::collections::HashMap;

use crate::models::Photo;

/// Photos the user marked on the current page, keyed by id.
///
/// The map only exists once something has been toggled; dropping it is how a
/// new page starts with nothing selected.
#[derive(Clone, Debug, Default)]
pub struct PhotoSelection {
    selected: Option<HashMap<i64, Photo>>,
}

impl PhotoSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the photo is selected afterwards. Photos without an id
    /// cannot be selected.
    pub fn toggle(&mut self, photo: &Photo) -> bool {
        let Some(id) = photo.id else {
            return false;
        };
        let selected = self.selected.get_or_insert_with(HashMap::new);
        if selected.remove(&id).is_some() {
            false
        } else {
            selected.insert(id, photo.clone());
            true
        }
    }

    pub fn is_selected(&self, photo: &Photo) -> bool {
        match (&self.selected, photo.id) {
            (Some(selected), Some(id)) => selected.contains_key(&id),
            _ => false,
        }
    }

    pub fn selected(&self) -> impl Iterator<Item = &Photo> {
        self.selected.iter().flat_map(|selected| selected.values())
    }

    pub fn len(&self) -> usize {
        self.selected.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn discard(&mut self) {
        self.selected = None;
    }
}

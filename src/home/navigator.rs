use crate::error::{Error, Result};
use crate::models::Tag;

/// Breadcrumb path from the root to the selected tag.
///
/// Always a simple path: a tag that is already on the trail is never pushed a
/// second time, selecting it cuts the trail back to it instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationTrail {
    tags: Vec<Tag>,
}

impl NavigationTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, tag: Tag) {
        match self.position(&tag) {
            Some(i) => {
                self.tags.truncate(i + 1);
                // keep the freshest copy of the tag (renames, parent changes)
                self.tags[i] = tag;
            }
            None => self.tags.push(tag),
        }
    }

    pub fn current(&self) -> Result<&Tag> {
        self.tags.last().ok_or(Error::NoTagSelected)
    }

    /// The tag before the current one, if the trail is deeper than one tag.
    pub fn parent_of_current(&self) -> Option<&Tag> {
        self.tags.len().checked_sub(2).and_then(|i| self.tags.get(i))
    }

    /// Matches on the saved id. A tag without one never matches an entry.
    pub fn position(&self, tag: &Tag) -> Option<usize> {
        let id = tag.id?;
        self.tags.iter().position(|t| t.id == Some(id))
    }

    pub fn reset(&mut self) {
        self.tags.clear();
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(trail: &NavigationTrail) -> Vec<&str> {
        trail.as_slice().iter().map(Tag::label).collect()
    }

    #[test]
    fn test_current_on_empty_trail() {
        let trail = NavigationTrail::new();
        assert!(matches!(trail.current(), Err(Error::NoTagSelected)));
        assert!(trail.parent_of_current().is_none());
    }

    #[test]
    fn test_reselecting_last_tag_does_not_duplicate() {
        let mut trail = NavigationTrail::new();
        trail.select(Tag::root());
        trail.select(Tag::with_id(3, "Vacations"));
        trail.select(Tag::with_id(3, "Vacations"));

        assert_eq!(names(&trail), vec!["ROOT", "Vacations"]);
    }

    #[test]
    fn test_selecting_root_goes_back_to_start() {
        let mut trail = NavigationTrail::new();
        trail.select(Tag::root());
        trail.select(Tag::with_id(3, "Vacations"));
        trail.select(Tag::with_id(7, "Italy"));

        trail.select(Tag::root());

        assert_eq!(names(&trail), vec!["ROOT"]);
        assert!(trail.current().unwrap().is_root());
    }

    #[test]
    fn test_breadcrumb_back_to_ancestor() {
        let mut trail = NavigationTrail::new();
        trail.select(Tag::root());
        trail.select(Tag::with_id(3, "Vacations"));
        trail.select(Tag::with_id(7, "Italy"));
        trail.select(Tag::with_id(9, "Rome"));

        trail.select(Tag::with_id(3, "Vacations"));

        assert_eq!(names(&trail), vec!["ROOT", "Vacations"]);
        assert_eq!(trail.parent_of_current().map(Tag::label), Some("ROOT"));
    }

    #[test]
    fn test_matches_by_id_and_keeps_fresh_copy() {
        let mut trail = NavigationTrail::new();
        trail.select(Tag::root());
        trail.select(Tag::with_id(3, "Vacations"));
        trail.select(Tag::with_id(3, "Holidays"));

        assert_eq!(names(&trail), vec!["ROOT", "Holidays"]);
    }

    #[test]
    fn test_unsaved_tag_does_not_replace_root() {
        let mut trail = NavigationTrail::new();
        trail.select(Tag::root());
        trail.select(Tag::with_id(3, "Vacations"));

        assert_eq!(trail.position(&Tag::new("Draft")), None);
        trail.select(Tag::new("Draft"));

        assert_eq!(names(&trail), vec!["ROOT", "Vacations", "Draft"]);
        assert!(trail.as_slice()[0].is_root());
    }

    fn arb_tag() -> impl Strategy<Value = Tag> {
        (0i64..12).prop_map(|id| Tag::with_id(id, format!("tag-{id}")))
    }

    proptest! {
        #[test]
        fn prop_trail_is_simple_path(tags in prop::collection::vec(arb_tag(), 0..40)) {
            let mut trail = NavigationTrail::new();
            for tag in tags {
                trail.select(tag);
            }

            let mut ids: Vec<i64> = trail.as_slice().iter().map(Tag::key).collect();
            let len = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
        }

        #[test]
        fn prop_select_present_tag_truncates(
            tags in prop::collection::vec(arb_tag(), 1..30),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut trail = NavigationTrail::new();
            for tag in tags {
                trail.select(tag);
            }
            let before = trail.clone();
            let i = pick.index(before.len());
            let target = before.as_slice()[i].clone();

            trail.select(target.clone());

            prop_assert_eq!(trail.len(), i + 1);
            prop_assert_eq!(trail.current().unwrap().key(), target.key());
            prop_assert_eq!(&trail.as_slice()[..i], &before.as_slice()[..i]);
        }

        #[test]
        fn prop_select_absent_tag_appends(
            tags in prop::collection::vec(arb_tag(), 0..30),
            new_id in 100i64..200,
        ) {
            let mut trail = NavigationTrail::new();
            for tag in tags {
                trail.select(tag);
            }
            let before = trail.clone();

            trail.select(Tag::with_id(new_id, "fresh"));

            prop_assert_eq!(trail.len(), before.len() + 1);
            prop_assert_eq!(&trail.as_slice()[..before.len()], before.as_slice());
            prop_assert_eq!(trail.current().unwrap().key(), new_id);
        }
    }
}

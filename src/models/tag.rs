use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::user::User;

pub const ROOT_TAG_ID: i64 = 0;
pub const ROOT_TAG_NAME: &str = "ROOT";

/// Bare `{ id }` reference the backend uses for the many-to-many sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub tag_type: Option<String>,
    pub parent_tag: Option<Box<Tag>>,
    #[serde(default)]
    pub photos: Vec<EntityRef>,
    pub user: Option<User>,
}

impl Tag {
    /// The synthetic entry point of the tree. It exists only on the client.
    pub fn root() -> Self {
        Tag {
            id: Some(ROOT_TAG_ID),
            name: Some(ROOT_TAG_NAME.to_string()),
            ..Default::default()
        }
    }

    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Tag {
            id: Some(id),
            ..Tag::new(name)
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == Some(ROOT_TAG_ID)
    }

    /// Identifier used in request paths. Unsaved tags address the root.
    pub fn key(&self) -> i64 {
        self.id.unwrap_or(ROOT_TAG_ID)
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_tag.as_ref().and_then(|parent| parent.id)
    }
}

impl From<&Tag> for EntityRef {
    fn from(tag: &Tag) -> Self {
        EntityRef { id: tag.key() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_tag() {
        let root = Tag::root();
        assert!(root.is_root());
        assert_eq!(root.label(), "ROOT");
        assert_eq!(root.key(), 0);
    }

    #[test]
    fn test_deserialize_nested_parent() {
        let value = json!({
            "id": 7,
            "name": "Italy",
            "type": "place",
            "parentTag": { "id": 3, "name": "Vacations" },
            "photos": [{ "id": 11 }, { "id": 12 }]
        });

        let tag: Tag = serde_json::from_value(value).unwrap();
        assert_eq!(tag.id, Some(7));
        assert_eq!(tag.tag_type.as_deref(), Some("place"));
        assert_eq!(tag.parent_id(), Some(3));
        assert_eq!(tag.photos, vec![EntityRef { id: 11 }, EntityRef { id: 12 }]);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let value = serde_json::to_value(Tag::new("Vacations")).unwrap();
        assert_eq!(value, json!({ "name": "Vacations", "photos": [] }));
    }
}

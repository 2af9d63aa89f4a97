use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::tag::EntityRef;
use super::user::User;

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Option<i64>,
    pub file_name: Option<String>,
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub photo_type: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<EntityRef>,
    pub user: Option<User>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
}

impl Photo {
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    /// `name.type` as it was uploaded.
    pub fn original_file_name(&self) -> Option<String> {
        match (&self.file_name, &self.photo_type) {
            (Some(name), Some(ext)) => Some(format!("{name}.{ext}")),
            (Some(name), None) => Some(name.clone()),
            _ => None,
        }
    }

    /// The edit form only carries whole seconds.
    pub fn truncate_date_for_form(&mut self) {
        self.date_created = self.date_created.map(|date| date.trunc_subsecs(0));
    }
}

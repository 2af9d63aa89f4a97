#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use photo_organizer::error::{Error, Result};
use photo_organizer::models::{Account, EntityRef, Page, PageRequest, Photo, Tag};
use photo_organizer::services::{AccountService, PhotoService, TagService};
use photo_organizer::utils::upload::PhotoForm;

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub tags: Mutex<Vec<Tag>>,
    pub photos: Mutex<Vec<Photo>>,
    pub account: Mutex<Option<Account>>,
    pub calls: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<PhotoForm>>,
    failing: Mutex<HashSet<&'static str>>,
    gates: Mutex<HashMap<i64, Arc<Semaphore>>>,
    next_id: Mutex<i64>,
}

impl FakeBackend {
    /// ROOT
    /// ├── Vacations (3)
    /// │   └── Italy (7)
    /// │       └── Rome (9)
    /// └── Family (4)
    pub fn with_tree() -> Arc<Self> {
        let vacations = Tag::with_id(3, "Vacations");
        let italy = Tag {
            parent_tag: Some(Box::new(vacations.clone())),
            ..Tag::with_id(7, "Italy")
        };
        let rome = Tag {
            parent_tag: Some(Box::new(italy.clone())),
            ..Tag::with_id(9, "Rome")
        };
        let family = Tag::with_id(4, "Family");

        let photos = vec![
            photo(21, "beach", &[3]),
            photo(22, "colosseum", &[3, 7, 9]),
            photo(23, "gondola", &[3, 7]),
            photo(24, "birthday", &[4]),
        ];

        let backend = FakeBackend::default();
        *backend.tags.lock() = vec![vacations, italy, rome, family];
        *backend.photos.lock() = photos;
        *backend.account.lock() = Some(Account {
            id: 1,
            login: "admin".to_string(),
            first_name: None,
            last_name: None,
        });
        *backend.next_id.lock() = 100;
        Arc::new(backend)
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().remove(operation);
    }

    /// Requests about `tag_id` block until permits are added to the returned
    /// semaphore, one permit per request.
    pub fn hold(&self, tag_id: i64) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates.lock().insert(tag_id, gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: String, operation: &'static str) -> Result<()> {
        self.calls.lock().push(call);
        if self.failing.lock().contains(operation) {
            return Err(Error::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    async fn wait_gate(&self, tag_id: i64) {
        let gate = self.gates.lock().get(&tag_id).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }

    fn allocate_id(&self) -> i64 {
        let mut next = self.next_id.lock();
        *next += 1;
        *next
    }
}

pub fn photo(id: i64, name: &str, tags: &[i64]) -> Photo {
    Photo {
        id: Some(id),
        file_name: Some(name.to_string()),
        photo_type: Some("jpg".to_string()),
        tags: tags.iter().map(|id| EntityRef { id: *id }).collect(),
        ..Default::default()
    }
}

pub fn names(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|t| t.label().to_string()).collect()
}

#[async_trait]
impl TagService for FakeBackend {
    async fn children_of(&self, tag_id: i64) -> Result<Vec<Tag>> {
        self.record(format!("children {tag_id}"), "children")?;
        self.wait_gate(tag_id).await;

        let parent = if tag_id == 0 { None } else { Some(tag_id) };
        Ok(self
            .tags
            .lock()
            .iter()
            .filter(|t| t.parent_id() == parent)
            .cloned()
            .collect())
    }

    async fn find_tag(&self, id: i64) -> Result<Tag> {
        self.record(format!("find_tag {id}"), "find_tag")?;
        self.tags
            .lock()
            .iter()
            .find(|t| t.id == Some(id))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("tags/{id}")))
    }

    async fn query_tags(&self, _request: Option<&PageRequest>) -> Result<Page<Tag>> {
        self.record("query_tags".to_string(), "query_tags")?;
        Ok(Page::new(self.tags.lock().clone()))
    }

    async fn create_tag(&self, tag: &Tag) -> Result<Tag> {
        self.record(format!("create_tag {}", tag.label()), "create_tag")?;
        let created = Tag {
            id: Some(self.allocate_id()),
            ..tag.clone()
        };
        self.tags.lock().push(created.clone());
        Ok(created)
    }

    async fn update_tag(&self, tag: &Tag) -> Result<Tag> {
        self.record(format!("update_tag {}", tag.key()), "update_tag")?;
        let mut tags = self.tags.lock();
        let slot = tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or_else(|| Error::NotFound(format!("tags/{}", tag.key())))?;
        *slot = tag.clone();
        Ok(tag.clone())
    }

    async fn delete_tag(&self, id: i64) -> Result<()> {
        self.record(format!("delete_tag {id}"), "delete_tag")?;
        let mut doomed = vec![id];
        let mut i = 0;
        {
            let tags = self.tags.lock();
            while i < doomed.len() {
                let parent = doomed[i];
                doomed.extend(tags.iter().filter(|t| t.parent_id() == Some(parent)).map(Tag::key));
                i += 1;
            }
        }
        self.tags.lock().retain(|t| !doomed.contains(&t.key()));
        let mut photos = self.photos.lock();
        for photo in photos.iter_mut() {
            photo.tags.retain(|t| !doomed.contains(&t.id));
        }
        photos.retain(|p| !p.tags.is_empty());
        Ok(())
    }
}

#[async_trait]
impl PhotoService for FakeBackend {
    async fn photos_by_tag(&self, tag_id: i64, request: &PageRequest) -> Result<Page<Photo>> {
        self.record(
            format!(
                "photos tag={tag_id} page={} size={} sort={}",
                request.page,
                request.size,
                request.sort.join(";")
            ),
            "photos",
        )?;
        self.wait_gate(tag_id).await;

        let matching: Vec<Photo> = self
            .photos
            .lock()
            .iter()
            .filter(|p| tag_id == 0 || p.tags.iter().any(|t| t.id == tag_id))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip((request.page * request.size) as usize)
            .take(request.size as usize)
            .collect();

        Ok(Page {
            items,
            total_count: Some(total),
            links: Default::default(),
        })
    }

    async fn query_photos(&self, _request: Option<&PageRequest>) -> Result<Page<Photo>> {
        self.record("query_photos".to_string(), "query_photos")?;
        Ok(Page::new(self.photos.lock().clone()))
    }

    async fn find_photo(&self, id: i64) -> Result<Photo> {
        self.record(format!("find_photo {id}"), "find_photo")?;
        self.photos
            .lock()
            .iter()
            .find(|p| p.id == Some(id))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("photos/{id}")))
    }

    async fn photo_image(&self, id: i64) -> Result<String> {
        self.record(format!("photo_image {id}"), "photo_image")?;
        Ok("data:image/jpg;base64,AAAA".to_string())
    }

    async fn save_photo(&self, form: PhotoForm) -> Result<Photo> {
        self.record(format!("save_photo {:?}", form.photo_id), "save_photo")?;
        self.uploads.lock().push(form.clone());

        let tags = form.tag_ids.iter().map(|id| EntityRef { id: *id }).collect();
        let mut photos = self.photos.lock();
        match form.photo_id {
            Some(id) => {
                let stored = photos
                    .iter_mut()
                    .find(|p| p.id == Some(id))
                    .ok_or_else(|| Error::NotFound(format!("photos/{id}")))?;
                stored.tags = tags;
                Ok(stored.clone())
            }
            None => {
                let name = form
                    .image
                    .as_ref()
                    .map(|image| image.file_name().to_string())
                    .unwrap_or_default();
                let created = Photo {
                    id: Some(self.allocate_id()),
                    file_name: Some(name),
                    tags,
                    ..Default::default()
                };
                photos.push(created.clone());
                Ok(created)
            }
        }
    }

    async fn delete_photo(&self, id: i64) -> Result<()> {
        self.record(format!("delete_photo {id}"), "delete_photo")?;
        self.photos.lock().retain(|p| p.id != Some(id));
        Ok(())
    }
}

#[async_trait]
impl AccountService for FakeBackend {
    async fn identity(&self) -> Result<Option<Account>> {
        self.record("identity".to_string(), "identity")?;
        Ok(self.account.lock().clone())
    }
}

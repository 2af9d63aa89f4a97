use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::navigator::NavigationTrail;
use super::selection::PhotoSelection;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::ListModification;
use crate::models::{Account, Page, PageRequest, Photo, Sort, Tag};
use crate::services::{AccountService, Backend, PhotoService, TagService};

#[derive(Clone, Debug, PartialEq)]
pub struct Paging {
    /// One-based, as shown to the user.
    pub page: u32,
    pub previous_page: u32,
    pub items_per_page: u32,
    pub sort: Sort,
}

impl Paging {
    pub fn new(items_per_page: u32, sort: Sort) -> Self {
        Paging {
            page: 1,
            previous_page: 1,
            items_per_page,
            sort,
        }
    }

    fn request(&self) -> PageRequest {
        PageRequest::new(self.page.saturating_sub(1), self.items_per_page, &self.sort)
    }
}

#[derive(Debug)]
struct HomeState {
    account: Option<Account>,
    trail: NavigationTrail,
    tags: Vec<Tag>,
    photos: Page<Photo>,
    selection: PhotoSelection,
    paging: Paging,
    tags_generation: u64,
    photos_generation: u64,
}

/// State behind the home view: where the user is in the tag tree, what the
/// current tag contains, and which photos are marked.
///
/// Loads for a selection are tagged with a generation number. A response that
/// arrives after a newer selection (or photo reload) has started is dropped.
pub struct HomeController<B: ?Sized> {
    backend: Arc<B>,
    state: Mutex<HomeState>,
}

impl<B: Backend + ?Sized> HomeController<B> {
    pub fn new(backend: Arc<B>, paging: Paging) -> Self {
        HomeController {
            backend,
            state: Mutex::new(HomeState {
                account: None,
                trail: NavigationTrail::new(),
                tags: Vec::new(),
                photos: Page::default(),
                selection: PhotoSelection::new(),
                paging,
                tags_generation: 0,
                photos_generation: 0,
            }),
        }
    }

    pub fn from_config(backend: Arc<B>, config: &Config) -> Self {
        Self::new(backend, Paging::new(config.items_per_page, config.sort.clone()))
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Asks the identity collaborator who is signed in and starts browsing.
    pub async fn resolve_identity(&self) -> Result<Option<Account>> {
        let account = self.backend.identity().await?;
        self.on_authenticated(account.clone()).await?;
        Ok(account)
    }

    /// Starts over at the root for a signed-in account, or empties the view.
    pub async fn on_authenticated(&self, account: Option<Account>) -> Result<()> {
        let signed_in = account.is_some();
        {
            let mut state = self.state.lock();
            info!(login = ?account.as_ref().map(|a| a.login.as_str()), "authentication changed");
            state.account = account;
            state.trail.reset();
            if !signed_in {
                state.tags.clear();
                state.photos = Page::default();
                state.selection.discard();
                state.tags_generation += 1;
                state.photos_generation += 1;
            }
        }

        if signed_in {
            self.select_tag(Tag::root()).await?;
        }
        Ok(())
    }

    /// Moves to `tag` and loads its children and photos.
    ///
    /// Both requests run concurrently and each result is applied as soon as it
    /// arrives; a failure of one does not hold back the other.
    pub async fn select_tag(&self, tag: Tag) -> Result<()> {
        let tag_id = tag.key();
        let (tags_generation, photos_generation, request) = {
            let mut state = self.state.lock();
            state.trail.select(tag);
            state.tags_generation += 1;
            state.photos_generation += 1;
            debug!(
                tag_id,
                depth = state.trail.len(),
                generation = state.tags_generation,
                "tag selected"
            );
            (state.tags_generation, state.photos_generation, state.paging.request())
        };

        let load_children = async {
            let children = self.backend.children_of(tag_id).await?;
            self.apply_children(tags_generation, children);
            Ok::<(), Error>(())
        };
        let load_photos = self.fetch_photos(photos_generation, tag_id, request);

        let (children, photos) = tokio::join!(load_children, load_photos);
        children.and(photos)
    }

    pub fn current_tag(&self) -> Result<Tag> {
        self.state.lock().trail.current().cloned()
    }

    /// Reloads the photos for a different page. Asking for the page that was
    /// loaded last does nothing and returns `false`.
    pub async fn load_page(&self, page: u32) -> Result<bool> {
        let (tag_id, generation, request) = {
            let mut state = self.state.lock();
            if page == state.paging.previous_page {
                return Ok(false);
            }
            let tag_id = state.trail.current()?.key();
            state.paging.previous_page = page;
            state.paging.page = page;
            state.photos_generation += 1;
            (tag_id, state.photos_generation, state.paging.request())
        };

        debug!(tag_id, page, "loading photo page");
        self.fetch_photos(generation, tag_id, request).await?;
        Ok(true)
    }

    /// Back to the first page of the current tag.
    pub async fn clear(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.paging.page = 1;
            state.paging.previous_page = 1;
        }
        self.reload_photos().await
    }

    pub async fn reload_photos(&self) -> Result<()> {
        let (tag_id, generation, request) = {
            let mut state = self.state.lock();
            let tag_id = state.trail.current()?.key();
            state.photos_generation += 1;
            (tag_id, state.photos_generation, state.paging.request())
        };
        self.fetch_photos(generation, tag_id, request).await
    }

    /// Refreshes after a dialog saved or deleted something.
    pub async fn handle_event(&self, event: ListModification) -> Result<()> {
        debug!(?event, "list modification");
        match event {
            ListModification::Photos => self.reload_photos().await,
            ListModification::Tags { content: true } => {
                let current = self.current_tag()?;
                self.select_tag(current).await
            }
            ListModification::Tags { content: false } => {
                let parent = {
                    let state = self.state.lock();
                    state.trail.parent_of_current().cloned()
                };
                self.select_tag(parent.unwrap_or_else(Tag::root)).await
            }
        }
    }

    pub fn toggle_photo(&self, photo: &Photo) -> bool {
        self.state.lock().selection.toggle(photo)
    }

    pub fn is_photo_selected(&self, photo: &Photo) -> bool {
        self.state.lock().selection.is_selected(photo)
    }

    pub fn selected_photos(&self) -> Vec<Photo> {
        self.state.lock().selection.selected().cloned().collect()
    }

    pub fn account(&self) -> Option<Account> {
        self.state.lock().account.clone()
    }

    pub fn trail(&self) -> Vec<Tag> {
        self.state.lock().trail.as_slice().to_vec()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.state.lock().tags.clone()
    }

    pub fn photos(&self) -> Page<Photo> {
        self.state.lock().photos.clone()
    }

    pub fn paging(&self) -> Paging {
        self.state.lock().paging.clone()
    }

    fn apply_children(&self, generation: u64, children: Vec<Tag>) {
        let mut state = self.state.lock();
        if state.tags_generation != generation {
            debug!(generation, current = state.tags_generation, "dropping stale child tags");
            return;
        }
        state.tags = children;
    }

    async fn fetch_photos(&self, generation: u64, tag_id: i64, request: PageRequest) -> Result<()> {
        let page = self.backend.photos_by_tag(tag_id, &request).await?;

        let mut state = self.state.lock();
        if state.photos_generation != generation {
            debug!(generation, current = state.photos_generation, "dropping stale photo page");
            return Ok(());
        }
        state.photos = page;
        state.selection.discard();
        Ok(())
    }
}

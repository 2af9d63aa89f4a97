//! Client side of the photo organizer: browse the tag tree, page through the
//! photos of a tag, mark photos, and edit tags and photos through dialogs
//! backed by the REST API.

pub mod config;
pub mod error;
pub mod events;
pub mod home;
pub mod message;
pub mod models;
pub mod popups;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
pub use home::HomeController;
pub use popups::PopupService;
pub use services::{ApiClient, Backend};

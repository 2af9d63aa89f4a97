pub mod account_service;
pub mod api_client;
pub mod photo_service;
pub mod tag_service;

pub use account_service::AccountService;
pub use api_client::ApiClient;
pub use photo_service::PhotoService;
pub use tag_service::TagService;

/// Everything the home view and the popups need from the REST backend.
pub trait Backend: TagService + PhotoService + AccountService {}

impl<T> Backend for T where T: TagService + PhotoService + AccountService + ?Sized {}

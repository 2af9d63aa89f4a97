pub mod photo;
pub mod tag;
pub mod user;
pub mod page;

pub use photo::Photo;
pub use tag::{EntityRef, Tag};
pub use user::{Account, User};
pub use page::{Page, PageRequest, Sort, SortDirection};

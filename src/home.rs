pub mod controller;
pub mod navigator;
pub mod selection;

pub use controller::{HomeController, Paging};
pub use navigator::NavigationTrail;
pub use selection::PhotoSelection;

pub mod transferring_site;

pub use transferring_site::{SiteKind, TransferringSite};

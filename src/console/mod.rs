//! Client-side state for the admin console: a typed API client and the
//! cached, filterable views built on top of it.

pub mod api;
pub mod cache;
pub mod dashboard;
pub mod events;
pub mod notice;
pub mod snapshot;
pub mod view;

pub use api::{ConsoleError, DirectoryApi, HttpDirectoryApi};
pub use cache::DirectoryCache;
pub use dashboard::DashboardStats;
pub use events::EventBoard;
pub use notice::{Notice, Severity};
pub use snapshot::Snapshot;

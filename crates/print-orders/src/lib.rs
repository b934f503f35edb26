mod auth;
mod config;
pub mod document;
mod files;
mod orders;
pub mod store;
mod types;

pub use auth::{AdminCredentials, Authenticator};
pub use config::ShopConfig;
pub use document::{count_pages, count_pdf_bytes};
pub use files::{FileRegistry, STORED_FILES_KEY, StoredFile};
pub use orders::{ORDERS_KEY, OrderBook};
pub use store::{JsonFileStore, KvStore, MemoryStore, namespaced};
pub use types::*;

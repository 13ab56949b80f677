//! Salon management core: clients, services, appointments and payments
//! persisted as whole collections in a local key-value store.

pub mod booking;
pub mod models;
pub mod report;
pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::Store;

//! Person records: validated input, the file-backed store, and the trait the
//! HTTP layer programs against.

pub mod input;
pub mod repository;
pub mod store;

pub use input::RecordInput;
pub use repository::RecordRepository;
pub use store::RecordStore;

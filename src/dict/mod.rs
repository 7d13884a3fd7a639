pub mod store;

pub use store::{DictKind, WordStore};

pub mod error;
pub mod key;
pub mod store;

pub use error::CacheError;
pub use key::{CacheKey, MAX_KEY_LENGTH};
pub use store::PhraseCache;

//! The domain model and the cache-coherence core.

mod repository;
mod sync;
mod types;

pub use repository::PostRepository;
pub use sync::CachedThenRefresh;
pub use types::Post;

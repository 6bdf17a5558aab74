//! Building blocks of listing aggregation: key collection and cached batch
//! loading of owners, images and traces.

mod key_collector;
mod loaders;

pub use key_collector::{BatchKeyCollector, CollectedKeys};
pub use loaders::{
    load_through_cache, BatchLoader, FirstImageLoader, ImageSetLoader, OwnerLoader, TraceLoader,
};

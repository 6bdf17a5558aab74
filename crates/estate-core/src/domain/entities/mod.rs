//! Domain entities.

mod owner;
mod property;
mod property_image;
mod property_trace;

pub use owner::*;
pub use property::*;
pub use property_image::*;
pub use property_trace::*;

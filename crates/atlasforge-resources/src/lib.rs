//! Storage for Atlasforge artifacts.
//!
//! [`AtlasData`] is the encoded form of a packed atlas and [`ResourceFile`] is
//! the single-file store that fonts and atlases live in.

mod codec;
mod error;
mod store;

pub use codec::AtlasData;
pub use error::{ResourceError, ResourceResult};
pub use store::{ATLASES_BUCKET, FONTS_BUCKET, ResourceFile};

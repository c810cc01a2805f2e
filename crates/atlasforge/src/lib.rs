//! Atlasforge: packs the glyph atlases a project asks for into a resource file.
//!
//! A project lists atlas requests in `*.atlas.yml` (or `*.atlas.toml`) files
//! anywhere in its tree. [`Packer::run`] finds them with [`AtlasFiles`], builds
//! each atlas from a font stored in the resource file and writes the results
//! back under the `atlases` bucket.
//!
//! ```no_run
//! use atlasforge::{Packer, ResourceFile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resources = ResourceFile::open("stage.res")?;
//! let mut packer = Packer::new(resources);
//! let report = packer.run("assets");
//! for failure in &report.failed {
//!     eprintln!("{failure}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod walk;

pub use batch::{BatchFailure, BatchReport, Packer};
pub use config::{AtlasRequest, ConfigFormat, load_requests};
pub use error::{PackError, PackResult};
pub use walk::AtlasFiles;

pub use atlasforge_resources::{ATLASES_BUCKET, AtlasData, FONTS_BUCKET, ResourceFile};

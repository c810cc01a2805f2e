//! Packing every atlas a project asks for into one resource file.

use std::fmt;
use std::path::{Path, PathBuf};

use atlasforge_core::{TrueTypeFace, pack_atlas};
use atlasforge_resources::{AtlasData, FONTS_BUCKET, ResourceFile};
use tracing::{debug, info, warn};

use crate::config::{AtlasRequest, load_requests};
use crate::error::{PackError, PackResult};
use crate::walk::AtlasFiles;

/// What failed during a batch run.
#[derive(Debug)]
pub struct BatchFailure {
    /// The configuration file involved.
    pub file: PathBuf,
    /// The request name, or `None` if the whole file could not be used.
    pub request: Option<String>,
    /// The cause.
    pub error: PackError,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.request {
            Some(name) => write!(f, "{}: atlas '{}': {}", self.file.display(), name, self.error),
            None => write!(f, "{}: {}", self.file.display(), self.error),
        }
    }
}

/// Outcome of [`Packer::run`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Names of atlases that were packed and stored.
    pub packed: Vec<String>,
    /// Everything that went wrong.
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every request was packed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn fail(&mut self, file: PathBuf, request: Option<String>, error: PackError) {
        let failure = BatchFailure { file, request, error };
        warn!(target: "atlasforge::batch", "{failure}");
        self.failed.push(failure);
    }
}

/// Builds atlases from fonts stored in a resource file and stores the results
/// back into it.
#[derive(Debug)]
pub struct Packer {
    resources: ResourceFile,
}

impl Packer {
    /// Create a packer working on `resources`.
    pub fn new(resources: ResourceFile) -> Self {
        Self { resources }
    }

    /// The underlying resource file.
    pub fn resources(&self) -> &ResourceFile {
        &self.resources
    }

    /// Build the atlas described by `request`.
    ///
    /// Character ranges are checked before the font is looked up, so a
    /// malformed range is reported even when the font is also unusable.
    pub fn pack_request(&self, request: &AtlasRequest) -> PackResult<AtlasData> {
        let chars = request.code_points()?;
        let font = self
            .resources
            .get(FONTS_BUCKET, &request.font)
            .ok_or_else(|| PackError::FontNotFound(request.font.clone()))?;
        let face = TrueTypeFace::from_bytes(font, f32::from(request.size))?;

        debug!(
            target: "atlasforge::batch",
            atlas = %request.name,
            font = %request.font,
            size = request.size,
            code_points = chars.len(),
            "packing atlas"
        );

        let atlas = pack_atlas(&face, &chars, request.padding());
        Ok(AtlasData::new(request.font.clone(), request.size, atlas))
    }

    /// Pack and store every request found under `root`.
    ///
    /// Failures are recorded and the run continues with the next request. The
    /// resource file is committed once at the end if anything was stored.
    pub fn run(&mut self, root: impl AsRef<Path>) -> BatchReport {
        let mut report = BatchReport::default();

        for file in AtlasFiles::new(root.as_ref()) {
            let file = match file {
                Ok(file) => file,
                Err(error) => {
                    let dir = match &error {
                        PackError::Io { path, .. } => path.clone(),
                        _ => root.as_ref().to_path_buf(),
                    };
                    report.fail(dir, None, error);
                    continue;
                }
            };

            let requests = match load_requests(&file) {
                Ok(requests) => requests,
                Err(error) => {
                    report.fail(file, None, error);
                    continue;
                }
            };

            for request in requests {
                match self.store(&request) {
                    Ok(()) => {
                        info!(
                            target: "atlasforge::batch",
                            atlas = %request.name,
                            file = %file.display(),
                            "stored atlas"
                        );
                        report.packed.push(request.name);
                    }
                    Err(error) => report.fail(file.clone(), Some(request.name), error),
                }
            }
        }

        if !report.packed.is_empty()
            && let Err(error) = self.resources.commit()
        {
            let path = self.resources.path().to_path_buf();
            report.fail(path, None, error.into());
        }

        report
    }

    fn store(&mut self, request: &AtlasRequest) -> PackResult<()> {
        let atlas = self.pack_request(request)?;
        self.resources.put_atlas(&request.name, &atlas)?;
        Ok(())
    }
}

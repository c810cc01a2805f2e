//! The resource file: an embedded key-value store persisted as a TAR archive.
//!
//! Entries are grouped into buckets. On disk every entry is a regular file
//! named `<bucket>/<key>`; in memory the whole archive is held as nested maps
//! and written back in one go by [`ResourceFile::commit`].

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::AtlasData;
use crate::error::{ResourceError, ResourceResult};

/// Bucket holding raw font binaries, keyed by font identifier.
pub const FONTS_BUCKET: &str = "fonts";

/// Bucket holding encoded atlases, keyed by atlas name.
pub const ATLASES_BUCKET: &str = "atlases";

type Bucket = BTreeMap<String, Vec<u8>>;

/// An open resource file.
///
/// Changes stay in memory until [`commit`](Self::commit) is called.
#[derive(Debug)]
pub struct ResourceFile {
    path: PathBuf,
    buckets: BTreeMap<String, Bucket>,
    dirty: bool,
}

impl ResourceFile {
    /// Open the resource file at `path`, starting empty if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> ResourceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let buckets = match fs::File::open(&path) {
            Ok(file) => read_archive(&path, file)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    target: "atlasforge_resources::store",
                    path = %path.display(),
                    "creating new resource file"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(ResourceError::io(&path, e)),
        };
        Ok(Self {
            path,
            buckets,
            dirty: false,
        })
    }

    /// Path the file is committed to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Look up an entry.
    pub fn get(&self, bucket: &str, key: &str) -> Option<&[u8]> {
        self.buckets.get(bucket)?.get(key).map(Vec::as_slice)
    }

    /// Insert or replace an entry.
    pub fn put(
        &mut self,
        bucket: &str,
        key: &str,
        data: impl Into<Vec<u8>>,
    ) -> ResourceResult<()> {
        validate(bucket, key)?;
        self.buckets
            .entry(bucket.to_owned())
            .or_default()
            .insert(key.to_owned(), data.into());
        self.dirty = true;
        Ok(())
    }

    /// Remove an entry, returning its contents.
    ///
    /// A bucket left without entries disappears.
    pub fn remove(&mut self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let entries = self.buckets.get_mut(bucket)?;
        let removed = entries.remove(key)?;
        if entries.is_empty() {
            self.buckets.remove(bucket);
        }
        self.dirty = true;
        Some(removed)
    }

    /// Keys of `bucket` in sorted order.
    pub fn keys(&self, bucket: &str) -> impl Iterator<Item = &str> {
        self.buckets
            .get(bucket)
            .into_iter()
            .flat_map(|entries| entries.keys().map(String::as_str))
    }

    /// Names of all non-empty buckets in sorted order.
    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Encode `atlas` and store it under `atlases/<name>`.
    pub fn put_atlas(&mut self, name: &str, atlas: &AtlasData) -> ResourceResult<()> {
        let bytes = atlas.to_bytes()?;
        self.put(ATLASES_BUCKET, name, bytes)
    }

    /// Decode the atlas stored under `atlases/<name>`.
    pub fn atlas(&self, name: &str) -> Option<ResourceResult<AtlasData>> {
        self.get(ATLASES_BUCKET, name).map(AtlasData::from_bytes)
    }

    /// Write all entries back to disk.
    ///
    /// The archive is written to a temporary file next to the target and then
    /// renamed over it, so readers never see a partial file. Does nothing when
    /// there are no changes.
    pub fn commit(&mut self) -> ResourceResult<()> {
        if !self.dirty {
            return Ok(());
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| ResourceError::io(dir, e))?;

        {
            let mut builder = tar::Builder::new(temp.as_file_mut());
            for (bucket, entries) in &self.buckets {
                for (key, data) in entries {
                    let mut header = tar::Header::new_gnu();
                    header.set_entry_type(tar::EntryType::Regular);
                    header.set_size(data.len() as u64);
                    header.set_mode(0o644);
                    header.set_mtime(0);
                    builder
                        .append_data(&mut header, format!("{bucket}/{key}"), data.as_slice())
                        .map_err(|e| ResourceError::io(&self.path, e))?;
                }
            }
            builder.finish().map_err(|e| ResourceError::io(&self.path, e))?;
        }

        temp.as_file()
            .sync_all()
            .map_err(|e| ResourceError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| ResourceError::io(&self.path, e.error))?;

        self.dirty = false;
        debug!(
            target: "atlasforge_resources::store",
            path = %self.path.display(),
            buckets = self.buckets.len(),
            "committed resource file"
        );
        Ok(())
    }
}

fn read_archive(path: &Path, file: fs::File) -> ResourceResult<BTreeMap<String, Bucket>> {
    let mut archive = tar::Archive::new(BufReader::new(file));
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    for entry in archive.entries().map_err(|e| ResourceError::io(path, e))? {
        let mut entry = entry.map_err(|e| ResourceError::io(path, e))?;
        if entry.header().entry_type() != tar::EntryType::Regular {
            continue;
        }

        let name = entry.path().map_err(|e| ResourceError::io(path, e))?;
        let Some((bucket, key)) = name.to_str().and_then(|n| n.split_once('/')) else {
            warn!(
                target: "atlasforge_resources::store",
                entry = %name.display(),
                "ignoring entry outside any bucket"
            );
            continue;
        };
        let (bucket, key) = (bucket.to_owned(), key.to_owned());

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut data)
            .map_err(|e| ResourceError::io(path, e))?;
        buckets.entry(bucket).or_default().insert(key, data);
    }

    Ok(buckets)
}

fn validate(bucket: &str, key: &str) -> ResourceResult<()> {
    if bucket.is_empty() {
        return Err(ResourceError::invalid_key(bucket, key, "bucket name is empty"));
    }
    if bucket.contains('/') {
        return Err(ResourceError::invalid_key(bucket, key, "bucket name contains '/'"));
    }
    if is_relative_segment(bucket) {
        return Err(ResourceError::invalid_key(bucket, key, "bucket name is '.' or '..'"));
    }
    if key.is_empty() {
        return Err(ResourceError::invalid_key(bucket, key, "key is empty"));
    }
    if key
        .split('/')
        .any(|part| part.is_empty() || is_relative_segment(part))
    {
        return Err(ResourceError::invalid_key(
            bucket,
            key,
            "key has an empty or relative segment",
        ));
    }
    Ok(())
}

// TAR paths cannot hold these components.
fn is_relative_segment(part: &str) -> bool {
    part == "." || part == ".."
}

//! Atlas request configuration files.
//!
//! A project describes the atlases it needs in `*.atlas.yml` files, each a
//! list of requests:
//!
//! ```yaml
//! - name: ui-small
//!   font: inter
//!   size: 14
//!   characterRanges:
//!     - [" ", "~"]
//!     - ["А", "я"]
//! ```
//!
//! The same requests can be written in TOML as `*.atlas.toml`:
//!
//! ```toml
//! [[atlas]]
//! name = "ui-small"
//! font = "inter"
//! size = 14
//! characterRanges = [[" ", "~"]]
//! padding = 1
//! ```

use std::fs;
use std::path::Path;

use atlasforge_core::{AtlasResult, CodePointSet, DEFAULT_PADDING, Fixed, expand_ranges};
use serde::{Deserialize, Serialize};

use crate::error::{PackError, PackResult};

/// File name suffixes recognised as YAML atlas configuration.
pub const YAML_SUFFIXES: &[&str] = &[".atlas.yml", ".atlas.yaml"];

/// File name suffix recognised as TOML atlas configuration.
pub const TOML_SUFFIX: &str = ".atlas.toml";

/// One atlas to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasRequest {
    /// Key the atlas is stored under.
    pub name: String,
    /// Identifier of a font in the `fonts` bucket.
    pub font: String,
    /// Point size to render at.
    pub size: u16,
    /// Inclusive `[low, high]` pairs of single characters.
    pub character_ranges: Vec<[String; 2]>,
    /// Pixels between glyphs; defaults to 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<u16>,
}

impl AtlasRequest {
    /// Expand the configured ranges into code points.
    pub fn code_points(&self) -> AtlasResult<CodePointSet> {
        expand_ranges(
            self.character_ranges
                .iter()
                .map(|[low, high]| (low.as_str(), high.as_str())),
        )
    }

    /// Padding in layout units.
    pub fn padding(&self) -> Fixed {
        self.padding
            .map(|p| Fixed::from_int(i32::from(p)))
            .unwrap_or(DEFAULT_PADDING)
    }
}

#[derive(Deserialize)]
struct TomlDocument {
    #[serde(default)]
    atlas: Vec<AtlasRequest>,
}

/// Configuration format, chosen by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Format of `path`, if its name ends in a recognised suffix.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if YAML_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            Some(Self::Yaml)
        } else if name.ends_with(TOML_SUFFIX) {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

/// Parse requests from `text` in the given format.
///
/// `path` is only used to label errors.
pub fn parse_requests(
    text: &str,
    format: ConfigFormat,
    path: &Path,
) -> PackResult<Vec<AtlasRequest>> {
    match format {
        ConfigFormat::Yaml => {
            // An empty YAML document is null, not an empty sequence.
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_yaml::from_str(text).map_err(|e| PackError::config(path, e))
        }
        ConfigFormat::Toml => toml::from_str::<TomlDocument>(text)
            .map(|doc| doc.atlas)
            .map_err(|e| PackError::config(path, e)),
    }
}

/// Read every request in the configuration file at `path`.
pub fn load_requests(path: impl AsRef<Path>) -> PackResult<Vec<AtlasRequest>> {
    let path = path.as_ref();
    let format =
        ConfigFormat::from_path(path)
            .ok_or_else(|| PackError::UnsupportedFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
    parse_requests(&text, format, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlasforge_core::AtlasError;

    const YAML: &str = r#"
- name: ui
  font: inter
  size: 14
  characterRanges:
    - ["A", "C"]
    - ["0", "1"]
- name: title
  font: serif
  size: 32
  padding: 4
  characterRanges: []
"#;

    #[test]
    fn test_parse_yaml() {
        let requests = parse_requests(YAML, ConfigFormat::Yaml, Path::new("x.atlas.yml")).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].name, "ui");
        assert_eq!(requests[0].size, 14);
        assert_eq!(requests[0].padding, None);
        assert_eq!(requests[0].padding(), DEFAULT_PADDING);
        assert_eq!(requests[1].padding(), Fixed::from_int(4));

        let chars: Vec<char> = requests[0].code_points().unwrap().iter().collect();
        assert_eq!(chars, ['0', '1', 'A', 'B', 'C']);
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
[[atlas]]
name = "ui"
font = "inter"
size = 14
characterRanges = [["a", "c"]]

[[atlas]]
name = "mono"
font = "mono"
size = 12
characterRanges = []
padding = 0
"#;
        let requests = parse_requests(text, ConfigFormat::Toml, Path::new("x.atlas.toml")).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].character_ranges, [["a".to_owned(), "c".to_owned()]]);
        assert_eq!(requests[1].padding(), Fixed::ZERO);
    }

    #[test]
    fn test_empty_files() {
        let yaml = parse_requests("", ConfigFormat::Yaml, Path::new("e.atlas.yml")).unwrap();
        assert!(yaml.is_empty());
        let toml = parse_requests("", ConfigFormat::Toml, Path::new("e.atlas.toml")).unwrap();
        assert!(toml.is_empty());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_requests("- name: [", ConfigFormat::Yaml, Path::new("bad.atlas.yml"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.atlas.yml"));
        assert!(matches!(err, PackError::Config { .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/ui.atlas.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("ui.atlas.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("ui.atlas.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("ui.yml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("atlas.yml")), None);
    }

    #[test]
    fn test_bad_range_surfaces() {
        let request = AtlasRequest {
            name: "x".into(),
            font: "f".into(),
            size: 10,
            character_ranges: vec![["ab".into(), "z".into()]],
            padding: None,
        };
        assert!(matches!(request.code_points(), Err(AtlasError::InvalidRangeFormat { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.atlas.yml");
        fs::write(&path, YAML).unwrap();
        assert_eq!(load_requests(&path).unwrap().len(), 2);

        let err = load_requests(dir.path().join("missing.atlas.yml")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
        let err = load_requests(dir.path().join("notes.txt")).unwrap_err();
        assert!(matches!(err, PackError::UnsupportedFormat(_)));
    }
}

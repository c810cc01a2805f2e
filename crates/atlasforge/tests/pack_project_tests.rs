//! Integration tests for packing a whole project.
//!
//! Tests that build real atlases need a font file. Run them with:
//! ```
//! ATLASFORGE_TEST_FONT=/path/to/font.ttf cargo test --package atlasforge -- --ignored
//! ```

use std::fs;
use std::path::Path;

use atlasforge::{ATLASES_BUCKET, AtlasRequest, FONTS_BUCKET, PackError, Packer, ResourceFile};
use atlasforge_core::AtlasError;

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn resources_with_test_font(path: &Path) -> ResourceFile {
    let font = std::env::var("ATLASFORGE_TEST_FONT").expect("ATLASFORGE_TEST_FONT not set");
    let data = fs::read(font).expect("Failed to read test font");
    let mut resources = ResourceFile::open(path).unwrap();
    resources.put(FONTS_BUCKET, "test", data).unwrap();
    resources
}

#[test]
fn test_each_request_reports_its_own_failure() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("project");
    write(
        &project.join("ui.atlas.toml"),
        r#"
[[atlas]]
name = "bad-range"
font = "garbage"
size = 12
characterRanges = [["AB", "Z"]]

[[atlas]]
name = "bad-font"
font = "garbage"
size = 12
characterRanges = [["A", "Z"]]

[[atlas]]
name = "no-font"
font = "absent"
size = 12
characterRanges = [["A", "Z"]]
"#,
    );

    let mut resources = ResourceFile::open(dir.path().join("stage.res")).unwrap();
    resources.put(FONTS_BUCKET, "garbage", b"garbage".to_vec()).unwrap();
    let mut packer = Packer::new(resources);
    let report = packer.run(&project);

    let error = |name: &str| {
        let failure = report
            .failed
            .iter()
            .find(|f| f.request.as_deref() == Some(name));
        &failure.unwrap_or_else(|| panic!("{name} did not fail")).error
    };
    assert_eq!(report.failed.len(), 3);
    assert!(matches!(
        error("bad-range"),
        PackError::Atlas(AtlasError::InvalidRangeFormat { .. })
    ));
    assert!(matches!(error("bad-font"), PackError::Atlas(AtlasError::FontParse(_))));
    assert!(matches!(error("no-font"), PackError::FontNotFound(name) if name == "absent"));
    assert_eq!(packer.resources().keys(ATLASES_BUCKET).count(), 0);
}

#[test]
fn test_unreadable_project_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut packer = Packer::new(ResourceFile::open(dir.path().join("stage.res")).unwrap());
    let report = packer.run(dir.path().join("does-not-exist"));
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].error, PackError::Io { .. }));
}

#[test]
#[ignore = "requires a font file"]
fn test_pack_project_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("project");
    let out = dir.path().join("stage.res");
    write(
        &project.join("fonts.atlas.yml"),
        r#"
- name: ascii
  font: test
  size: 16
  characterRanges:
    - ["!", "~"]
- name: digits
  font: test
  size: 32
  padding: 4
  characterRanges:
    - ["0", "9"]
- name: broken
  font: test
  size: 16
  characterRanges:
    - ["", "9"]
"#,
    );
    write(
        &project.join("nested/more.atlas.toml"),
        r#"
[[atlas]]
name = "caps"
font = "test"
size = 20
characterRanges = [["A", "Z"]]
"#,
    );

    let mut packer = Packer::new(resources_with_test_font(&out));
    let report = packer.run(&project);

    assert_eq!(report.packed, ["ascii", "digits", "caps"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].request.as_deref(), Some("broken"));

    let reopened = ResourceFile::open(&out).unwrap();
    assert!(reopened.get(FONTS_BUCKET, "test").is_some());
    let digits = reopened.atlas("digits").unwrap().unwrap();
    assert_eq!(digits.size, 32);
    assert_eq!(digits.glyphs.len(), 11);
    assert!(digits.glyphs.contains_key(&' '));
    let (w, h) = digits.picture.dimensions();
    assert!(w > 0 && h > 0);
}

#[test]
#[ignore = "requires a font file"]
fn test_pack_request_direct() {
    let dir = tempfile::tempdir().unwrap();
    let packer = Packer::new(resources_with_test_font(&dir.path().join("stage.res")));
    let request = AtlasRequest {
        name: "reversed".into(),
        font: "test".into(),
        size: 12,
        character_ranges: vec![["z".into(), "a".into()]],
        padding: Some(0),
    };

    // A reversed range is empty; only the space is packed.
    let atlas = packer.pack_request(&request).unwrap();
    assert_eq!(atlas.glyphs.len(), 1);
    assert!(atlas.glyphs.contains_key(&' '));
}

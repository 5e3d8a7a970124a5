//! Integration tests for command handlers.
//!
//! These tests call the handlers directly with a config file written to a
//! temporary directory, and check the files they produce.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use folio::cli::{commands, Context};
use folio::core::config::Config;
use folio::core::template::MissingPolicy;
use folio::exif::OverwritePolicy;

// =============================================================================
// Test Fixtures
// =============================================================================

const CONFIG: &str = r##"
timezone = "+09:00"

[[series]]
name = "journal"
folder = "Journal"
specificities = [{ axis = "page", min = 1, max = 999 }]
template = ["J", { axis = "page", pad = 3 }, ".", { property = "title" }]

[[series]]
name = "herbarium"
specificities = [{ axis = "sheet", min = 1, max = 9999 }]
template = ["H", { axis = "sheet", pad = 4 }, "_", { property = "tags" }, "_", { property = "title" }]

[tags.oak]
category = "tree"
plain = "Oak"
ascii = "oak"
social = "#oak"

[tags.ash]
category = "tree"
plain = "Ash"

[tags.wip]
category = "special"
plain = "WIP"

[genres.tree]
metadata_head = "Flora"
social_head = "#flora"
default_fragment = "trees"

[genres.mixed]
metadata_head = "Misc"
social_head = "#misc"
default_fragment = "misc"
"##;

/// A temporary archive with a config file whose root points at it.
struct TestArchive {
    dir: TempDir,
}

impl TestArchive {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root = dir.path().join("archive");
        let contents = format!("root = {:?}\n{}", root.display().to_string(), CONFIG);
        std::fs::write(dir.path().join("folio.toml"), contents).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn root(&self) -> PathBuf {
        self.path().join("archive")
    }

    fn context(&self) -> Context {
        Context {
            config: Some(self.path().join("folio.toml")),
            debug: false,
            quiet: true,
        }
    }

    fn argfile(&self) -> PathBuf {
        self.path().join("batch.args")
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn composition_places_file_in_series_folder() {
    let archive = TestArchive::new();
    let library = archive.context().load_library().unwrap();

    let composition = commands::composition(
        &library,
        "journal",
        Path::new("IMG_0001.jpg"),
        &strings(&["7"]),
        Some("draft"),
        &[],
        &[],
    )
    .unwrap();

    assert_eq!(composition.name, "J007.draft");
    assert_eq!(
        composition.path,
        archive.root().join("Journal").join("J007.draft.jpg")
    );
    assert!(composition.manifestation.is_none());
}

#[test]
fn composition_uses_tag_fragment() {
    let archive = TestArchive::new();
    let library = archive.context().load_library().unwrap();

    let single = commands::composition(
        &library,
        "herbarium",
        Path::new("scan.tif"),
        &strings(&["12"]),
        Some("pressed"),
        &strings(&["oak", "wip"]),
        &[],
    )
    .unwrap();
    assert_eq!(single.name, "H0012_oak_pressed");
    assert_eq!(
        single.path,
        archive.root().join("herbarium").join("H0012_oak_pressed.tif")
    );

    let several = commands::composition(
        &library,
        "herbarium",
        Path::new("scan.tif"),
        &strings(&["12"]),
        Some("pressed"),
        &strings(&["oak", "ash"]),
        &[],
    )
    .unwrap();
    assert_eq!(several.name, "H0012_trees_pressed");
}

#[test]
fn composition_requires_every_fragment() {
    let archive = TestArchive::new();
    let library = archive.context().load_library().unwrap();

    let err = commands::composition(
        &library,
        "journal",
        Path::new("IMG_0001.jpg"),
        &strings(&["7"]),
        None,
        &[],
        &[],
    )
    .unwrap_err();
    assert!(err.to_string().contains("property 'title'"));

    let err = commands::composition(
        &library,
        "journal",
        Path::new("IMG_0001.jpg"),
        &strings(&["_"]),
        Some("draft"),
        &[],
        &[],
    )
    .unwrap_err();
    assert!(err.to_string().contains("axis 'page'"));
}

#[test]
fn composition_rejects_bad_identities() {
    let archive = TestArchive::new();
    let library = archive.context().load_library().unwrap();
    let original = Path::new("x.jpg");

    // wrong number of positions
    assert!(commands::composition(
        &library,
        "journal",
        original,
        &strings(&["1", "2"]),
        Some("t"),
        &[],
        &[]
    )
    .is_err());

    // out of range
    assert!(commands::composition(
        &library,
        "journal",
        original,
        &strings(&["1000"]),
        Some("t"),
        &[],
        &[]
    )
    .is_err());

    // unknown series
    let err = commands::composition(&library, "atlas", original, &[], None, &[], &[])
        .unwrap_err();
    assert!(err.to_string().contains("atlas"));
}

// =============================================================================
// Argument files
// =============================================================================

#[test]
fn argfile_with_series_targets_composed_path() {
    let archive = TestArchive::new();
    let ctx = archive.context();

    commands::argfile(
        &ctx,
        &archive.argfile(),
        Path::new("scan.tif"),
        "pressed",
        "collected 1998",
        &strings(&["oak", "wip"]),
        false,
        OverwritePolicy::Original,
        Some("herbarium"),
        &strings(&["12"]),
    )
    .unwrap();

    let contents = std::fs::read_to_string(archive.argfile()).unwrap();
    let target = archive
        .root()
        .join("herbarium")
        .join("H0012_oak_pressed.tif");
    let expected = format!(
        "-Title=pressed\n\
         -Comment=collected 1998\n\
         -Keywords=\n\
         -Keywords+=Flora\n\
         -Keywords+=oak\n\
         -Keywords+=WIP\n\
         -overwrite_original\n\
         {}\n\
         -execute\n",
        target.display()
    );
    assert_eq!(contents, expected);
}

#[test]
fn argfile_appends_records() {
    let archive = TestArchive::new();
    let ctx = archive.context();

    for name in ["a.jpg", "b.jpg"] {
        commands::argfile(
            &ctx,
            &archive.argfile(),
            Path::new(name),
            "",
            "",
            &strings(&["oak"]),
            true,
            OverwritePolicy::None,
            None,
            &[],
        )
        .unwrap();
    }

    let contents = std::fs::read_to_string(archive.argfile()).unwrap();
    assert_eq!(contents.matches("-execute\n").count(), 2);
    assert_eq!(contents.matches("-Keywords+=oak\n").count(), 2);
    assert!(!contents.contains("Flora"));
    assert!(contents.contains("\na.jpg\n"));
    assert!(contents.ends_with("b.jpg\n-execute\n"));
}

#[test]
fn argfile_rejects_multiline_comment() {
    let archive = TestArchive::new();

    let result = commands::argfile(
        &archive.context(),
        &archive.argfile(),
        Path::new("a.jpg"),
        "",
        "one\ntwo",
        &[],
        false,
        OverwritePolicy::None,
        None,
        &[],
    );

    assert!(result.is_err());
    assert!(!archive.argfile().exists());
}

#[test]
fn argfile_unconfigured_genre_fails() {
    let archive = TestArchive::new();

    // "elm" is not in the taxonomy, so the set is unclassified.
    let result = commands::argfile(
        &archive.context(),
        &archive.argfile(),
        Path::new("a.jpg"),
        "",
        "",
        &strings(&["elm"]),
        false,
        OverwritePolicy::None,
        None,
        &[],
    );

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("unclassified"));
}

// =============================================================================
// Read-only commands
// =============================================================================

#[test]
fn read_only_commands_succeed() {
    let archive = TestArchive::new();
    let ctx = archive.context();

    commands::series_list(&ctx).unwrap();
    commands::series_show(&ctx, "journal").unwrap();
    commands::genre(&ctx, &strings(&["oak", "ash"])).unwrap();
    commands::manifest(&ctx, &strings(&["oak"]), true).unwrap();
    commands::config_check(&ctx).unwrap();
    commands::resolve(
        &ctx,
        "journal",
        &strings(&["_"]),
        &[],
        MissingPolicy::Glob,
        None,
        false,
    )
    .unwrap();
}

#[test]
fn resolve_absent_is_an_error() {
    let archive = TestArchive::new();

    let err = commands::resolve(
        &archive.context(),
        "journal",
        &strings(&["7"]),
        &[],
        MissingPolicy::Absent,
        None,
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("no name"));
}

#[test]
fn show_unknown_series_fails() {
    let archive = TestArchive::new();
    assert!(commands::series_show(&archive.context(), "atlas").is_err());
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn config_init_writes_loadable_starter() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config.toml");
    let ctx = Context {
        quiet: true,
        ..Default::default()
    };

    commands::config_init(&ctx, Some(&path)).unwrap();
    assert!(path.exists());

    let loaded = Config::load(Some(&path)).unwrap();
    let library = loaded.config.into_library().unwrap();
    assert!(library.registry().lookup_str("journal").is_ok());

    // never overwrites
    assert!(commands::config_init(&ctx, Some(&path)).is_err());
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("folio.toml");
    std::fs::write(&path, "[[series]]\nname = \"a/b\"\n").unwrap();

    let ctx = Context::with_config(&path);
    let err = commands::config_check(&ctx).unwrap_err();
    assert!(format!("{:#}", err).contains("cannot contain '/'"));
}

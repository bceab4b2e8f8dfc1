//! CLI integration tests for the `knitchart` binary.
//!
//! Covers creating designs, drawing (set, erase, shapes, flood, mirror),
//! layer management, dry-run mode, terminal display and PNG export.

use std::path::{Path, PathBuf};
use std::process::Command;

use knitchart::color::Color;
use knitchart::document::DesignDocument;
use knitchart::layer::LayerId;

/// Run knitchart in `dir` with a fixed config and return (stdout, stderr, success).
fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_knitchart"))
        .current_dir(dir)
        .env_remove("KNITCHART_LOG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("knitchart.toml"))
        .args(args)
        .output()
        .expect("Failed to execute knitchart");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// A temp dir holding a config and a new 10x10 design.
fn setup() -> (tempfile::TempDir, PathBuf) {
    knitchart::logging::test();
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("knitchart.toml"), "[grid]\nwidth = 10\nheight = 10\n").unwrap();
    let design = dir.path().join("design.json");
    let (_, stderr, ok) = run(dir.path(), &["new", "design.json"]);
    assert!(ok, "new failed: {}", stderr);
    (dir, design)
}

fn load(path: &Path) -> DesignDocument {
    DesignDocument::read(path).unwrap()
}

fn cell(document: &DesignDocument, id: u32, x: i32, y: i32) -> Option<Color> {
    document.layers.iter().find(|l| l.id == LayerId(id)).and_then(|l| l.get_world_cell(x, y)).cloned()
}

#[test]
fn test_new_uses_config_size() {
    let (_dir, design) = setup();
    let document = load(&design);
    assert_eq!((document.grid_width, document.grid_height), (10, 10));
    assert_eq!(document.layers.len(), 1);
    assert_eq!(document.layers[0].name, "Background");
}

#[test]
fn test_new_refuses_to_overwrite() {
    let (dir, _design) = setup();
    let (_, stderr, ok) = run(dir.path(), &["new", "design.json"]);
    assert!(!ok);
    assert!(stderr.contains("already exists"));
    let (_, _, ok) = run(dir.path(), &["new", "design.json", "--force", "--width", "20"]);
    assert!(ok);
    assert_eq!(load(&dir.path().join("design.json")).grid_width, 20);
}

#[test]
fn test_new_rejects_small_grid() {
    let (dir, _design) = setup();
    let (_, stderr, ok) = run(dir.path(), &["new", "tiny.json", "--width", "2"]);
    assert!(!ok);
    assert!(stderr.contains("invalid grid dimensions"));
}

#[test]
fn test_new_flat_chart() {
    let (dir, _design) = setup();
    let (_, _, ok) = run(dir.path(), &["new", "flat.json", "--flat"]);
    assert!(ok);
    assert!(load(&dir.path().join("flat.json")).layers.is_empty());
}

#[test]
fn test_draw_set_and_erase() {
    let (dir, design) = setup();
    let (_, stderr, ok) =
        run(dir.path(), &["draw", "design.json", "--set", "1,2=#FF0000", "--set", "3,3=blue", "--erase", "3,3"]);
    assert!(ok, "draw failed: {}", stderr);
    assert!(stderr.contains("Wrote:"));
    let document = load(&design);
    assert_eq!(cell(&document, 1, 1, 2), Some(Color::new("#FF0000")));
    assert_eq!(cell(&document, 1, 3, 3), None);
}

#[test]
fn test_draw_shapes_and_flood() {
    let (dir, design) = setup();
    let (_, stderr, ok) = run(
        dir.path(),
        &["draw", "design.json", "--rect", "0,0,4,4=#0000FF", "--flood", "2,2=#00FF00", "--line", "5,9,9,9=red"],
    );
    assert!(ok, "draw failed: {}", stderr);
    let document = load(&design);
    assert_eq!(cell(&document, 1, 0, 0), Some(Color::new("#0000FF")));
    assert_eq!(cell(&document, 1, 2, 2), Some(Color::new("#00FF00")));
    assert_eq!(cell(&document, 1, 7, 9), Some(Color::new("red")));
    // Flood stayed inside the outline
    assert_eq!(cell(&document, 1, 6, 6), None);
}

#[test]
fn test_draw_with_mirror() {
    let (dir, design) = setup();
    let (_, stderr, ok) =
        run(dir.path(), &["draw", "design.json", "--mirror", "h", "--mirror", "v", "--set", "1,1=red"]);
    assert!(ok, "draw failed: {}", stderr);
    let document = load(&design);
    for (x, y) in [(1, 1), (8, 1), (1, 8), (8, 8)] {
        assert_eq!(cell(&document, 1, x, y), Some(Color::new("red")));
    }
}

#[test]
fn test_draw_outside_mirror_quadrant_fails() {
    let (dir, design) = setup();
    let (_, stderr, ok) = run(dir.path(), &["draw", "design.json", "--mirror", "h", "--set", "7,1=red"]);
    assert!(!ok);
    assert!(stderr.contains("mirror"));
    assert_eq!(cell(&load(&design), 1, 7, 1), None);
}

#[test]
fn test_draw_dry_run_leaves_file() {
    let (dir, design) = setup();
    let before = std::fs::read_to_string(&design).unwrap();
    let (stdout, _, ok) = run(dir.path(), &["draw", "design.json", "--set", "0,0=red", "--dry-run"]);
    assert!(ok);
    assert!(stdout.contains('+'));
    assert_eq!(std::fs::read_to_string(&design).unwrap(), before);
}

#[test]
fn test_draw_output_redirect() {
    let (dir, design) = setup();
    let (_, _, ok) = run(dir.path(), &["draw", "design.json", "--set", "0,0=red", "-o", "copy.json"]);
    assert!(ok);
    assert_eq!(cell(&load(&design), 1, 0, 0), None);
    assert_eq!(cell(&load(&dir.path().join("copy.json")), 1, 0, 0), Some(Color::new("red")));
}

#[test]
fn test_draw_invalid_arguments() {
    let (dir, _design) = setup();
    let (_, stderr, ok) = run(dir.path(), &["draw", "design.json"]);
    assert!(!ok);
    assert!(stderr.contains("No draw operations"));
    let (_, stderr, ok) = run(dir.path(), &["draw", "design.json", "--set", "1,1=notacolor"]);
    assert!(!ok);
    assert!(stderr.contains("invalid color"));
    let (_, _, ok) = run(dir.path(), &["draw", "design.json", "--set", "20,1=red"]);
    assert!(!ok);
}

#[test]
fn test_layer_add_draw_and_list() {
    let (dir, design) = setup();
    let (stdout, _, ok) = run(dir.path(), &["layer", "design.json", "add", "--name", "Motif"]);
    assert!(ok);
    assert!(stdout.contains("Added layer 2"));

    let (_, _, ok) = run(dir.path(), &["draw", "design.json", "--set", "4,4=red"]);
    assert!(ok);
    let (_, _, ok) = run(dir.path(), &["layer", "design.json", "move", "1", "-2"]);
    assert!(ok);

    let document = load(&design);
    assert_eq!(document.active_layer_id, Some(LayerId(2)));
    assert_eq!(cell(&document, 2, 5, 2), Some(Color::new("red")));
    assert_eq!(cell(&document, 1, 4, 4), None);

    let (stdout, _, ok) = run(dir.path(), &["layer", "design.json", "list"]);
    assert!(ok);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with('*'));
    assert!(lines[0].contains("Motif"));
    assert!(lines[1].contains("Background"));
}

#[test]
fn test_layer_errors() {
    let (dir, _design) = setup();
    let (_, stderr, ok) = run(dir.path(), &["layer", "design.json", "delete"]);
    assert!(!ok);
    assert!(stderr.contains("only layer"));
    let (_, stderr, ok) = run(dir.path(), &["layer", "design.json", "merge-down"]);
    assert!(!ok);
    assert!(stderr.contains("no layer below"));
    let (_, _, ok) = run(dir.path(), &["layer", "design.json", "opacity", "1", "150"]);
    assert!(!ok);
}

#[test]
fn test_show_plain() {
    let (dir, _design) = setup();
    run(dir.path(), &["draw", "design.json", "--set", "0,0=#FF0000"]);
    let (stdout, _, ok) = run(dir.path(), &["show", "design.json", "--plain"]);
    assert!(ok);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].trim_start().starts_with("1  2  3"));
    assert!(lines[1].starts_with("  1   a  ."));
    assert!(stdout.contains("a = #FF0000"));
}

#[test]
fn test_export_png() {
    let (dir, _design) = setup();
    run(dir.path(), &["draw", "design.json", "--set", "0,0=#FF0000"]);
    let (_, stderr, ok) = run(dir.path(), &["export", "design.json", "-o", "out/design.png", "--cell-size", "3"]);
    assert!(ok, "export failed: {}", stderr);

    let image = image::open(dir.path().join("out/design.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (30, 30));
    assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(20, 20).0, [255, 255, 255, 255]);
}

#[test]
fn test_missing_file_reports_error() {
    let (dir, _design) = setup();
    let (_, stderr, ok) = run(dir.path(), &["show", "nope.json"]);
    assert!(!ok);
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_invalid_config_is_reported() {
    let (dir, _design) = setup();
    std::fs::write(dir.path().join("knitchart.toml"), "[history]\nmax_depth = 0\n").unwrap();
    let (_, stderr, ok) = run(dir.path(), &["show", "design.json"]);
    assert!(!ok);
    assert!(stderr.contains("history.max_depth"));
}

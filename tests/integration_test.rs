use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Bounds {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Outcome {
    source: PathBuf,
    output: PathBuf,
    raster_width: u32,
    raster_height: u32,
    bounds: Bounds,
    area: f64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Failed {
    source: PathBuf,
    error: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Summary {
    output_dir: PathBuf,
    processed: Vec<Outcome>,
    skipped: Vec<PathBuf>,
    failed: Vec<Failed>,
}

const BRIGHT_RECT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="48" shape-rendering="crispEdges">
    <rect width="64" height="48" fill="black"/>
    <rect x="10" y="6" width="30" height="20" fill="#e0e0e0"/>
</svg>"##;

const TWO_BLOBS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="80" height="40" shape-rendering="crispEdges">
    <rect width="80" height="40" fill="black"/>
    <rect x="2" y="2" width="6" height="6" fill="white"/>
    <rect x="30" y="5" width="40" height="30" fill="rgb(200,60,60)"/>
</svg>"#;

const ALL_BLACK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
    <rect width="32" height="32" fill="black"/>
</svg>"#;

fn write_svg(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write fixture");
    path
}

fn run_svgcrop(pattern: &str, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_svgcrop"))
        .args(["--input-glob", pattern])
        .args(extra)
        .env_remove("SVGCROP_OUTPUT_DIR")
        .output()
        .expect("Failed to run svgcrop")
}

fn run_with_summary(input_dir: &Path) -> (Output, Summary) {
    let summary_path = input_dir.join("summary.json");
    let pattern = format!("{}/*.svg", input_dir.display());
    let output = run_svgcrop(&pattern, &["--summary", summary_path.to_str().unwrap()]);
    let summary = serde_json::from_str(&fs::read_to_string(&summary_path).unwrap())
        .expect("Failed to parse summary");
    (output, summary)
}

fn png_dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).expect("Failed to open output");
    (img.width(), img.height())
}

#[test]
fn test_crops_to_bright_rectangle() {
    let dir = TempDir::new().unwrap();
    write_svg(dir.path(), "summary.svg", BRIGHT_RECT);

    let (output, summary) = run_with_summary(dir.path());

    assert!(output.status.success());
    let cropped = dir.path().join("cropped").join("summary.png");
    assert_eq!(png_dimensions(&cropped), (30, 20));

    let rgb = image::open(&cropped).unwrap().to_rgb8();
    assert!(rgb.pixels().all(|p| p.0 != [0, 0, 0]));

    assert_eq!(summary.processed.len(), 1);
    let outcome = &summary.processed[0];
    assert_eq!((outcome.bounds.x, outcome.bounds.y), (10, 6));
    assert_eq!((outcome.raster_width, outcome.raster_height), (64, 48));
}

#[test]
fn test_skips_red_variants() {
    let dir = TempDir::new().unwrap();
    write_svg(dir.path(), "plot.svg", BRIGHT_RECT);
    write_svg(dir.path(), "plot_red.svg", BRIGHT_RECT);

    let (output, summary) = run_with_summary(dir.path());

    assert!(output.status.success());
    assert!(dir.path().join("cropped").join("plot.png").exists());
    assert!(!dir.path().join("cropped").join("plot_red.png").exists());
    assert_eq!(summary.skipped, vec![dir.path().join("plot_red.svg")]);
}

#[test]
fn test_dark_image_does_not_stop_batch() {
    let dir = TempDir::new().unwrap();
    write_svg(dir.path(), "a_dark.svg", ALL_BLACK);
    write_svg(dir.path(), "b_bright.svg", BRIGHT_RECT);

    let (output, summary) = run_with_summary(dir.path());

    assert!(output.status.success());
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].source.ends_with("a_dark.svg"));
    assert!(summary.failed[0].error.contains("No foreground"));

    // the dark file keeps its uncropped raster
    assert_eq!(
        png_dimensions(&dir.path().join("cropped").join("a_dark.png")),
        (32, 32)
    );
    assert_eq!(
        png_dimensions(&dir.path().join("cropped").join("b_bright.png")),
        (30, 20)
    );
}

#[test]
fn test_keeps_only_larger_blob() {
    let dir = TempDir::new().unwrap();
    write_svg(dir.path(), "blobs.svg", TWO_BLOBS);

    let (output, _) = run_with_summary(dir.path());

    assert!(output.status.success());
    let rgb = image::open(dir.path().join("cropped").join("blobs.png"))
        .unwrap()
        .to_rgb8();
    assert_eq!(rgb.dimensions(), (40, 30));
    assert!(rgb.pixels().all(|p| p.0 == [200, 60, 60]));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    write_svg(dir.path(), "summary.svg", TWO_BLOBS);
    let pattern = format!("{}/*.svg", dir.path().display());
    let cropped = dir.path().join("cropped").join("summary.png");

    assert!(run_svgcrop(&pattern, &[]).status.success());
    let first = fs::read(&cropped).unwrap();
    assert!(run_svgcrop(&pattern, &[]).status.success());
    let second = fs::read(&cropped).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_explicit_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_svg(dir.path(), "summary.svg", BRIGHT_RECT);
    let pattern = format!("{}/*.svg", dir.path().display());

    let output = run_svgcrop(&pattern, &["--output-dir", out.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert!(out.path().join("summary.png").exists());
    assert!(!dir.path().join("cropped").exists());
}

#[test]
fn test_unwritable_output_dir_fails_batch() {
    let dir = TempDir::new().unwrap();
    write_svg(dir.path(), "summary.svg", BRIGHT_RECT);
    // a regular file where the output directory should be
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let pattern = format!("{}/*.svg", dir.path().display());

    let output = run_svgcrop(
        &pattern,
        &["--output-dir", blocker.join("out").to_str().unwrap()],
    );

    assert!(!output.status.success());
}

//! End-to-end tests for slicing sheets from disk and finalizing a bundle.

use std::fs;
use std::path::Path;

use gd2prep_bundle::{load_sheet, split, AssetBundle, BundleError, PixelFormat};
use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;

fn write_sheet(path: &Path, width: u32, height: u32) {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    image.save(path).unwrap();
}

fn build(dir: &Path) -> AssetBundle {
    let mut bundle = AssetBundle::new("Fixture");
    let strip = load_sheet(&dir.join("strip.png")).unwrap();
    bundle
        .load_handle("STRIP", &split(&strip, 30, 157).unwrap(), PixelFormat::Rgb565)
        .unwrap();
    let odd = load_sheet(&dir.join("odd.png")).unwrap();
    bundle
        .load_handle("ODD", &split(&odd, 16, 16).unwrap(), PixelFormat::Rgb565)
        .unwrap();
    bundle
}

#[test]
fn test_png_round_trip_through_bundle() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(&dir.path().join("strip.png"), 300, 157);
    write_sheet(&dir.path().join("odd.png"), 50, 37);

    let bundle = build(dir.path());
    let strip = bundle.entry("STRIP").unwrap();
    assert_eq!((strip.cells, strip.width, strip.height), (10, 30, 157));
    let odd = bundle.entry("ODD").unwrap();
    assert_eq!(odd.cells, 6);
    assert_eq!(odd.address % 4, 0);
    assert_eq!(odd.address, 10 * 30 * 157 * 2);
}

#[test]
fn test_finalize_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(&dir.path().join("strip.png"), 300, 157);
    write_sheet(&dir.path().join("odd.png"), 50, 37);

    let out = dir.path().join("Fixture_assets.h");
    let first = build(dir.path()).finalize(&out).unwrap();
    let first_bytes = fs::read(&out).unwrap();
    let second = build(dir.path()).finalize(&out).unwrap();
    let second_bytes = fs::read(&out).unwrap();

    assert_eq!(first.hash, second.hash);
    assert_eq!(first.bytes, first_bytes.len());
    assert!(first_bytes == second_bytes, "bundle output differs between runs");
}

#[test]
fn test_undecodable_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, b"not a png").unwrap();

    let err = load_sheet(&path).unwrap_err();
    match err {
        BundleError::AssetLoad { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

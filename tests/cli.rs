#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

use zenconvert::*;

fn run(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_zenconvert"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let bmp = dir.path().join("in.bmp");
    BmpCodec::new().save(&bmp, &Image::new(3, 3)).unwrap();
    let bmp = bmp.as_path();
    let out = dir.path().join("out.ppm");
    let missing = dir.path().join("missing.bmp");
    let unwritable = dir.path().join("nope").join("out.ppm");

    let ok = run(&[bmp, out.as_path()]);
    assert_eq!(ok.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&ok.stdout).trim(), "Successfully converted");

    assert_eq!(run(&[bmp]).status.code(), Some(1));
    assert_eq!(run(&[Path::new("a.gif"), bmp]).status.code(), Some(2));
    assert_eq!(run(&[bmp, Path::new("a.gif")]).status.code(), Some(3));
    assert_eq!(run(&[missing.as_path(), bmp]).status.code(), Some(4));

    let failed = run(&[bmp, unwritable.as_path()]);
    assert_eq!(failed.status.code(), Some(5));
    assert!(!failed.stderr.is_empty());
}

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_one_image_per_constant() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("Images");
    Command::cargo_bin("juliaset")
        .unwrap()
        .arg("-o")
        .arg(&out)
        .args(&["-r", "21", "-i", "50", "-t", "1", "-f", "pnm", "-p", "gray"])
        .args(&["-c", "-0.8,0.156", "-c", "0.285,0.01"])
        .assert()
        .success();

    for name in &["julia_1-1.pgm", "julia_2-1.pgm"] {
        let bytes = fs::read(out.join(name)).unwrap();
        assert!(bytes.starts_with(b"P5"), "{} is not a PGM", name);
    }
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn writes_every_default_palette() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("juliaset")
        .unwrap()
        .arg("-o")
        .arg(dir.path())
        .args(&["-r", "11", "-i", "20", "-t", "1", "-f", "pnm", "-c", "-0.8,0.156"])
        .assert()
        .success();

    let expected = [
        ("julia_1-1.pgm", b"P5"),
        ("julia_1-2.ppm", b"P6"),
        ("julia_1-3.ppm", b"P6"),
    ];
    for &(name, magic) in expected.iter() {
        let bytes = fs::read(dir.path().join(name)).unwrap();
        assert!(bytes.starts_with(magic), "{} has the wrong header", name);
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
}

#[test]
fn unknown_palette_is_rejected() {
    Command::cargo_bin("juliaset")
        .unwrap()
        .args(&["--palette", "viridis"])
        .assert()
        .failure();
}

#[test]
fn inverted_viewport_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("juliaset")
        .unwrap()
        .arg("-o")
        .arg(dir.path())
        .args(&["-x", "1,-1", "-r", "11", "-c", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid viewport"));
}

#[test]
fn unknown_tier_is_rejected() {
    Command::cargo_bin("juliaset")
        .unwrap()
        .args(&["--tier", "turbo"])
        .assert()
        .failure();
}

#[test]
fn sweep_writes_one_image_per_step() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("sweep")
        .unwrap()
        .arg("-o")
        .arg(dir.path())
        .args(&["-r", "15", "-i", "30", "-n", "3", "-t", "1", "-f", "pnm"])
        .assert()
        .success();

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    assert!(dir.path().join("julia_(-0.1000,0.6500).pgm").exists());
    assert!(dir.path().join("julia_(-0.1000,0.6530).pgm").exists());
}

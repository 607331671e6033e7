//! Integration tests for the elfsect binary.
//!
//! Each test writes a small synthetic ELF64 image to a temp directory and
//! runs the compiled binary against it.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled elfsect binary.
fn elfsect() -> Command {
    Command::new(env!("CARGO_BIN_EXE_elfsect"))
}

/// Build an image with sections NULL, `.text`, `.note.gnu.build-id`,
/// `.shstrtab`, with the names stored in reverse order.
fn fixture_image() -> Vec<u8> {
    let text: &[u8] = &[0x31, 0xc0, 0xc3];
    let mut note = Vec::new();
    note.extend_from_slice(&4u32.to_le_bytes());
    note.extend_from_slice(&20u32.to_le_bytes());
    note.extend_from_slice(&3u32.to_le_bytes());
    note.extend_from_slice(b"GNU\0");
    note.extend_from_slice(b"\x00__gmon_start__\x00libc");

    // Reverse storage order: .shstrtab, .note.gnu.build-id, .text
    let strtab = b"\0.shstrtab\0.note.gnu.build-id\0.text\0";
    let (shstrtab_name, note_name, text_name) = (1u32, 11u32, 30u32);

    let mut image = vec![0u8; 64];
    image[0..4].copy_from_slice(b"\x7fELF");
    image[4] = 2;
    image[5] = 1;
    image[6] = 1;
    image[58..60].copy_from_slice(&64u16.to_le_bytes());

    let text_off = image.len() as u64;
    image.extend_from_slice(text);
    let note_off = image.len() as u64;
    image.extend_from_slice(&note);
    let strtab_off = image.len() as u64;
    image.extend_from_slice(strtab);
    while image.len() % 8 != 0 {
        image.push(0);
    }
    let shoff = image.len() as u64;

    let entries = [
        (0u32, 0u32, 0u64, 0u64),
        (text_name, 1, text_off, text.len() as u64),
        (note_name, 7, note_off, note.len() as u64),
        (shstrtab_name, 3, strtab_off, strtab.len() as u64),
    ];
    for (name, ty, off, size) in entries {
        let mut e = [0u8; 64];
        e[0..4].copy_from_slice(&name.to_le_bytes());
        e[4..8].copy_from_slice(&ty.to_le_bytes());
        e[24..32].copy_from_slice(&off.to_le_bytes());
        e[32..40].copy_from_slice(&size.to_le_bytes());
        image.extend_from_slice(&e);
    }

    image[40..48].copy_from_slice(&shoff.to_le_bytes());
    image[60..62].copy_from_slice(&4u16.to_le_bytes());
    image[62..64].copy_from_slice(&3u16.to_le_bytes());
    image
}

/// Write the fixture to a per-test temp file.
fn write_fixture(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("elfsect-{tag}-{}.elf", std::process::id()));
    std::fs::write(&path, fixture_image()).expect("failed to write fixture");
    path
}

fn run(args: &[&str]) -> Output {
    elfsect().args(args).output().expect("failed to execute elfsect")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn read_prints_hex() {
    let path = write_fixture("hex");
    let output = run(&["read", path.to_str().unwrap(), ".text"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "31c0c3\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn read_build_id() {
    let path = write_fixture("build-id");
    let output = run(&["read", path.to_str().unwrap(), ".note.gnu.build-id"]);
    assert!(output.status.success());
    let hex = stdout(&output);
    assert_eq!(&hex.trim_end()[32..], "005f5f676d6f6e5f73746172745f5f006c696263");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn read_raw_and_to_file() {
    let path = write_fixture("raw");
    let output = run(&["read", "--raw", path.to_str().unwrap(), ".text"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, [0x31, 0xc0, 0xc3]);

    let out_path = path.with_extension("bin");
    let output = run(&[
        "read",
        path.to_str().unwrap(),
        ".text",
        "-o",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read(&out_path).unwrap(), [0x31, 0xc0, 0xc3]);

    std::fs::remove_file(&out_path).unwrap();
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn read_missing_section_fails() {
    let path = write_fixture("missing");
    let output = run(&["read", path.to_str().unwrap(), ".does-not-exist"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("section .does-not-exist not found"), "stderr: {stderr}");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn list_shows_every_section() {
    let path = write_fixture("list");
    let output = run(&["list", path.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[2].contains(".text") && lines[2].contains("PROGBITS"));
    assert!(lines[3].contains(".note.gnu.build-id") && lines[3].contains("NOTE"));
    assert!(lines[4].contains(".shstrtab") && lines[4].contains("STRTAB"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn header_prints_fields() {
    let path = write_fixture("header");
    let output = run(&["header", path.to_str().unwrap(), "1"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("type:         PROGBITS"));
    assert!(text.contains("size:         0x3"));

    let output = run(&["header", path.to_str().unwrap(), "9"]);
    assert!(!output.status.success());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn rejects_non_elf_file() {
    let path = std::env::temp_dir().join(format!("elfsect-not-elf-{}", std::process::id()));
    std::fs::write(&path, b"#!/bin/sh\necho hello\n").unwrap();
    let output = run(&["read", path.to_str().unwrap(), ".text"]);
    assert!(!output.status.success());
    // Shorter than a file header.
    assert!(String::from_utf8_lossy(&output.stderr).contains("too short"));
    std::fs::remove_file(&path).unwrap();
}

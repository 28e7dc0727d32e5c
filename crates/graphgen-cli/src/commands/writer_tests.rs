use std::fs;

use graphgen_compiler::GeneratedFiles;

use super::writer::{WriteReport, write_files};

fn files() -> GeneratedFiles {
    let mut files = GeneratedFiles::new();
    files.insert("render/RenderFwd.h".to_owned(), "#pragma once\n".to_owned());
    files.insert("render/ts/Render.ts".to_owned(), "export class Point {}\n".to_owned());
    files
}

#[test]
fn creates_folders_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_files(dir.path(), &files()).unwrap();

    assert_eq!(report, WriteReport { written: 2, unchanged: 0 });
    let ts = fs::read_to_string(dir.path().join("render/ts/Render.ts")).unwrap();
    assert_eq!(ts, "export class Point {}\n");
}

#[test]
fn identical_files_are_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &files()).unwrap();

    let mut changed = files();
    changed.insert("render/RenderFwd.h".to_owned(), "#pragma once\nstruct Point;\n".to_owned());
    let report = write_files(dir.path(), &changed).unwrap();

    assert_eq!(report, WriteReport { written: 1, unchanged: 1 });
    let fwd = fs::read_to_string(dir.path().join("render/RenderFwd.h")).unwrap();
    assert!(fwd.contains("struct Point;"));
}

#[test]
fn failed_write_keeps_previous_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &files()).unwrap();

    let mut changed = GeneratedFiles::new();
    changed.insert("render/RenderFwd.h".to_owned(), "#pragma once\nstruct Point;\n".to_owned());
    changed.insert("render/RenderFwd.h/Nested.h".to_owned(), "#pragma once\n".to_owned());
    assert!(write_files(dir.path(), &changed).is_err());

    let fwd = fs::read_to_string(dir.path().join("render/RenderFwd.h")).unwrap();
    assert_eq!(fwd, "#pragma once\n");
    assert!(!dir.path().join("render/RenderFwd.h.tmp").exists());
}

#[test]
fn staged_files_are_renamed_into_place() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &files()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path().join("render"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().all(|n| !n.ends_with(".tmp")));
}

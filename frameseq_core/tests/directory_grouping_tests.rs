//! Directory listing and grouping through the reader collaborator

use frameseq_core::error::IoErrorKind;
use frameseq_core::{
    DirectoryListOptions, DirectoryListSort, Error, FileInfo, FrameRange, FsDirectoryReader,
    INVALID_FRAME, PathName, SequenceFormat, directory_list, find_sequence,
};
use frameseq_test_utils::{MockFileSystem, SequenceFixtureBuilder};
use std::io;

fn names(list: &[FileInfo]) -> Vec<String> {
    list.iter()
        .map(|info| info.file_name(INVALID_FRAME, false))
        .collect()
}

#[test]
fn test_two_groups_from_mixed_listing() {
    let fs = SequenceFixtureBuilder::new("/tmp")
        .with_sequence("file", ".ext", 1..=3, 4)
        .with_file("render1.ext")
        .build_mock();

    let list = directory_list(&fs, &PathName::new("/tmp"), &DirectoryListOptions::default())
        .unwrap();

    assert_eq!(list.len(), 2);
    let sequence = list[0].sequence().expect("grouped sequence");
    assert_eq!(sequence.ranges(), &[FrameRange::new(1, 3)]);
    assert_eq!(sequence.pad(), 4);
    assert_eq!(list[0].file_name(2, true), "/tmp/file0002.ext");
    assert_eq!(list[1].path().get(), "/tmp/render1.ext");
    assert!(!list[1].is_sequence_valid());
}

#[test]
fn test_large_unordered_listing_groups_once() {
    let mut frames: Vec<i64> = (1..=500).rev().collect();
    frames.retain(|f| f % 100 != 0);
    let fs = SequenceFixtureBuilder::new("/shots/sh010")
        .with_frames("comp_v001.", ".exr", &frames, 4)
        .with_frames("comp_v002.", ".exr", &[1, 2, 3], 4)
        .build_mock();

    let list = directory_list(
        &fs,
        &PathName::new("/shots/sh010"),
        &DirectoryListOptions::default(),
    )
    .unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(
        list[0].path().number(),
        "0001-0099,0101-0199,0201-0299,0301-0399,0401-0499"
    );
    assert_eq!(list[0].sequence().unwrap().len(), 495);
    assert_eq!(list[1].path().number(), "0001-0003");
}

#[test]
fn test_range_format_and_name_sort() {
    let fs = SequenceFixtureBuilder::new("/r")
        .with_frames("b.", ".dpx", &[10, 12], 0)
        .with_frames("a.", ".dpx", &[1, 2], 0)
        .with_directory("cache")
        .build_mock();
    let options = DirectoryListOptions {
        sequence_format: SequenceFormat::Range,
        sort: DirectoryListSort::Name,
        directories_first: true,
        ..Default::default()
    };

    let list = directory_list(&fs, &PathName::new("/r"), &options).unwrap();
    assert_eq!(names(&list), vec!["cache", "a.1-2.dpx", "b.10-12.dpx"]);
    assert!(list[0].is_directory());
}

#[test]
fn test_unreadable_directory_reports_io_error() {
    let mut fs = MockFileSystem::new();
    fs.add_file("/locked/a.0001.exr");
    fs.fail_directory("/locked", io::ErrorKind::PermissionDenied);

    let result = directory_list(&fs, &PathName::new("/locked"), &DirectoryListOptions::default());
    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind, IoErrorKind::PermissionDenied),
        other => panic!("Expected Io error, got {other:?}"),
    }

    let missing = directory_list(&fs, &PathName::new("/nope"), &DirectoryListOptions::default());
    assert!(matches!(missing, Err(Error::Io(_))));
}

#[test]
fn test_relative_listing_reads_current_directory() {
    let mut fs = MockFileSystem::new();
    fs.add_files(".", ["a1.exr", "a2.exr"]);

    let list = directory_list(&fs, &PathName::default(), &DirectoryListOptions::default()).unwrap();
    assert_eq!(names(&list), vec!["a1-2.exr"]);
    assert_eq!(list[0].path().directory(), "");

    let found = find_sequence(&fs, &PathName::new("a#.exr"), &DirectoryListOptions::default())
        .unwrap();
    assert_eq!(found.sequence().unwrap().len(), 2);
}

#[test]
fn test_find_sequence_reads_directory_once() {
    let fs = SequenceFixtureBuilder::new("/renders")
        .with_sequence("beauty.", ".exr", 1001..=1010, 0)
        .build_mock();

    let found = find_sequence(
        &fs,
        &PathName::new("/renders/beauty.####.exr"),
        &DirectoryListOptions::default(),
    )
    .unwrap();

    assert_eq!(found.path().get(), "/renders/beauty.1001-1010.exr");
    assert_eq!(found.expand().len(), 10);
    assert_eq!(found.expand()[0], "/renders/beauty.1001.exr");
    assert_eq!(fs.read_count(), 1);
}

#[test]
fn test_file_system_reader_groups_real_files() {
    let dir = SequenceFixtureBuilder::new("")
        .with_sequence("plate.", ".exr", 1..=4, 4)
        .with_frames("plate.", ".exr", &[7], 4)
        .with_file("plate.exr")
        .with_directory("sub")
        .build_on_disk()
        .unwrap();
    let root = format!("{}/", dir.path().display());

    let options = DirectoryListOptions {
        sort: DirectoryListSort::Name,
        ..Default::default()
    };
    let list = directory_list(&FsDirectoryReader::new(), &PathName::new(root.as_str()), &options)
        .unwrap();

    assert_eq!(names(&list), vec!["plate.0001-0004,0007.exr", "plate.exr", "sub"]);
    assert!(list[2].is_directory());
    assert_eq!(list[0].path().directory(), root);
}

#[test]
fn test_file_system_reader_missing_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let result = directory_list(
        &FsDirectoryReader::new(),
        &PathName::from(missing.as_path()),
        &DirectoryListOptions::default(),
    );
    match result {
        Err(Error::Io(e)) => {
            assert_eq!(e.kind, IoErrorKind::DirectoryNotFound);
            assert!(e.to_string().contains("missing"));
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

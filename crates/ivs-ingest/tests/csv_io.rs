use std::path::Path;

use polars::prelude::{DataType, df};
use tempfile::TempDir;

use ivs_ingest::{IngestError, read_survey_csv, write_survey_csv};

#[test]
fn written_table_reads_back_with_same_shape() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("merged.csv");
    let mut frame = df! {
        "S007_01" => [10i64, 20, 30],
        "S024" => [151i64, 152, 241],
        "S001" => [2i64, 2, 1],
    }
    .expect("frame");

    write_survey_csv(&mut frame, &path).expect("write");
    let back = read_survey_csv(&path).expect("read");

    assert_eq!(back.height(), 3);
    assert_eq!(back.width(), 3);
    assert_eq!(back.column("S007_01").expect("ids").dtype(), &DataType::Int64);
    let ids: Vec<Option<i64>> = back
        .column("S007_01")
        .expect("ids")
        .i64()
        .expect("i64")
        .into_iter()
        .collect();
    assert_eq!(ids, vec![Some(10), Some(20), Some(30)]);
}

#[test]
fn empty_cells_become_nulls() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("gaps.csv");
    std::fs::write(&path, "S007_01,S024\n1,151\n2,\n,153\n").expect("write fixture");

    let frame = read_survey_csv(&path).expect("read");

    assert_eq!(frame.height(), 3);
    assert_eq!(frame.column("S024").expect("col").null_count(), 1);
    assert_eq!(frame.column("S007_01").expect("col").null_count(), 1);
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let result = read_survey_csv(Path::new("/no/such/extract.csv"));
    match result {
        Err(IngestError::FileNotFound { path }) => {
            assert_eq!(path, Path::new("/no/such/extract.csv"));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn write_creates_missing_parent_directories() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("data").join("processed").join("out.csv");
    let mut frame = df! {
        "S007_01" => [1i64],
    }
    .expect("frame");

    write_survey_csv(&mut frame, &path).expect("write");

    assert!(path.exists());
}

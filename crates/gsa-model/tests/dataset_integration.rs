//! Integration tests for loading datasets from disk.

use std::fs;

use gsa_model::{Ceiling, Dataset, DatasetError, Status};
use tempfile::tempdir;

const SAMPLE: &str = r#"[
    {
        "id": "a1",
        "title": "Cloud Migration Services",
        "agency": "DHS",
        "naics": "541512",
        "setAside": ["8(a)"],
        "vehicle": "GSA MAS",
        "dueDate": "2026-04-10",
        "status": "Ready",
        "percentComplete": 90,
        "fitScore": 88,
        "ceiling": 4500000
    },
    {
        "id": "a2",
        "title": "Data Analytics Platform",
        "agency": "HHS",
        "naics": "518210",
        "setAside": ["WOSB", "HUBZone"],
        "vehicle": "SEWP V",
        "dueDate": "2026-05-22",
        "status": "Draft",
        "percentComplete": 20,
        "fitScore": 65,
        "ceiling": {"min": 1000000, "max": 3000000}
    }
]"#;

#[test]
fn test_load_from_file() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("opportunities.json");
    fs::write(&path, SAMPLE).expect("failed to write dataset");

    let dataset = Dataset::load(&path).expect("failed to load dataset");

    assert_eq!(dataset.len(), 2);
    let first = &dataset.opportunities()[0];
    assert_eq!(first.status, Status::Ready);
    assert_eq!(first.ceiling, Some(Ceiling::Single(4_500_000)));

    let second = dataset.find("a2").expect("a2 should exist");
    assert_eq!(second.ceiling.map(|c| c.min()), Some(1_000_000));
    assert_eq!(second.ceiling.map(|c| c.max()), Some(3_000_000));
}

#[test]
fn test_load_missing_file_is_read_error() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("missing.json");

    let err = Dataset::load(&path).unwrap_err();
    assert!(matches!(err, DatasetError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_load_malformed_record_is_json_error() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"[{"id": "x", "title": "no other fields"}]"#).unwrap();

    let err = Dataset::load(&path).unwrap_err();
    assert!(matches!(err, DatasetError::Json(_)));
}

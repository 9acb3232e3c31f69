//! Adversarial edge-case integration tests.
//!
//! These tests feed degenerate, truncated and hostile PLY input through
//! the public API and check that every failure is a reported error with
//! the right kind, never a panic or a silently short store.

use ptio::{read, read_bytes, PlyError, PointCloudStore, PropertyNameMap, StoreError};
use std::io::Write as _;
use tempfile::NamedTempFile;

fn parse(data: &[u8]) -> Result<PointCloudStore, PlyError> {
    read_bytes(data, &PropertyNameMap::default(), 1.0)
}

fn xyz_header(format: &str, count: usize) -> String {
    format!(
        "ply\nformat {} 1.0\nelement vertex {}\nproperty double x\n\
         property double y\nproperty double z\nend_header\n",
        format, count
    )
}

// ────────────────── headers ──────────────────

#[test]
fn empty_input() {
    assert!(matches!(parse(b""), Err(PlyError::MalformedHeader(_))));
}

#[test]
fn magic_only() {
    assert!(matches!(parse(b"ply\n"), Err(PlyError::MalformedHeader(_))));
}

#[test]
fn format_line_missing() {
    let data = b"ply\nelement vertex 0\nproperty float x\nend_header\n";
    assert!(matches!(parse(data), Err(PlyError::MalformedHeader(_))));
}

#[test]
fn non_utf8_header() {
    let data = b"ply\nformat ascii 1.0\ncomment \xff\xfe\nelement vertex 0\nend_header\n";
    assert!(matches!(parse(data), Err(PlyError::MalformedHeader(_))));
}

#[test]
fn negative_vertex_count() {
    let data = b"ply\nformat ascii 1.0\nelement vertex -3\nproperty float x\nend_header\n";
    assert!(matches!(parse(data), Err(PlyError::MalformedHeader(_))));
}

#[test]
fn property_before_element() {
    let data = b"ply\nformat ascii 1.0\nproperty float x\nelement vertex 0\nend_header\n";
    assert!(matches!(parse(data), Err(PlyError::MalformedHeader(_))));
}

#[test]
fn big_endian_reported_as_unsupported() {
    let data = xyz_header("binary_big_endian", 0);
    assert!(matches!(
        parse(data.as_bytes()),
        Err(PlyError::UnsupportedFormat(_))
    ));
}

#[test]
fn vertex_without_position_properties() {
    let data = b"ply\nformat ascii 1.0\nelement vertex 1\nproperty uchar red\n\
                 property uchar green\nproperty uchar blue\nend_header\n1 2 3\n";
    assert!(matches!(
        parse(data),
        Err(PlyError::MissingRequiredProperty(_))
    ));
}

// ────────────────── bodies ──────────────────

#[test]
fn ascii_ten_declared_five_supplied() {
    let mut data = xyz_header("ascii", 10);
    for i in 0..5 {
        data.push_str(&format!("{} 0 0\n", i));
    }
    match parse(data.as_bytes()) {
        Err(PlyError::TruncatedData { expected, found }) => {
            assert_eq!(expected, 10);
            assert_eq!(found, 5);
        }
        other => panic!("expected TruncatedData, got {:?}", other),
    }
}

#[test]
fn binary_ten_declared_five_supplied() {
    let mut data = xyz_header("binary_little_endian", 10).into_bytes();
    for i in 0..5 {
        for v in [i as f64, 0.0, 0.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
    }
    assert!(matches!(
        parse(&data),
        Err(PlyError::TruncatedData {
            expected: 10,
            found: 5
        })
    ));
}

#[test]
fn binary_record_cut_mid_field() {
    let mut data = xyz_header("binary_little_endian", 1).into_bytes();
    data.extend_from_slice(&[0u8; 20]);
    assert!(matches!(
        parse(&data),
        Err(PlyError::TruncatedData {
            expected: 1,
            found: 0
        })
    ));
}

#[test]
fn ascii_huge_declared_count_fails_fast() {
    let mut data = xyz_header("ascii", usize::MAX);
    data.push_str("1 2 3\n");
    assert!(matches!(
        parse(data.as_bytes()),
        Err(PlyError::TruncatedData { found: 1, .. })
    ));
}

#[test]
fn ascii_blank_lines_are_skipped() {
    let mut data = xyz_header("ascii", 2);
    data.push_str("\n1 2 3\n\n   \n4 5 6");
    let store = parse(data.as_bytes()).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.position(1).unwrap(), [4.0, 5.0, 6.0]);
}

#[test]
fn ascii_crlf_body() {
    let data = "ply\r\nformat ascii 1.0\r\nelement vertex 2\r\nproperty float x\r\n\
                property float y\r\nproperty float z\r\nend_header\r\n1 2 3\r\n4 5 6\r\n";
    let store = parse(data.as_bytes()).unwrap();
    assert_eq!(store.positions(), &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
}

#[test]
fn ascii_nan_and_inf_positions() {
    let mut data = xyz_header("ascii", 1);
    data.push_str("NaN inf -inf\n");
    let store = parse(data.as_bytes()).unwrap();
    let p = store.position(0).unwrap();
    assert!(p[0].is_nan());
    assert_eq!(p[1], f64::INFINITY);
    assert_eq!(p[2], f64::NEG_INFINITY);
}

#[test]
fn trailing_garbage_after_vertices_is_ignored() {
    let mut data = xyz_header("binary_little_endian", 1).into_bytes();
    for v in [1.0f64, 2.0, 3.0] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data.extend_from_slice(b"garbage");
    let store = parse(&data).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn only_red_and_green_means_no_colors() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(
        b"ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nproperty float y\n\
          property float z\nproperty uchar red\nproperty uchar green\nend_header\n\
          0 0 0 1 2\n1 1 1 3 4\n",
    )
    .unwrap();
    let store = read(tmp.path(), &PropertyNameMap::default(), 1.0).unwrap();
    assert_eq!(store.len(), 2);
    assert!(!store.has_colors());
    assert!(matches!(
        store.color(0),
        Err(StoreError::AttributeNotPresent { .. })
    ));
}

#[test]
fn nan_scale_is_rejected() {
    let data = xyz_header("ascii", 0);
    assert!(matches!(
        read_bytes(data.as_bytes(), &PropertyNameMap::default(), f64::NAN),
        Err(PlyError::InvalidScale(_))
    ));
}

#[test]
fn errors_render_messages() {
    let err = parse(b"not a ply file").unwrap_err();
    assert!(err.to_string().contains("malformed PLY header"));

    let err = read(
        "/tmp/nonexistent_file_that_does_not_exist_12345.ply",
        &PropertyNameMap::default(),
        1.0,
    )
    .unwrap_err();
    assert!(matches!(err, PlyError::FileNotFound { .. }));
    assert!(err.to_string().contains("nonexistent_file_that_does_not_exist_12345"));
}

// ────────────────── store ──────────────────

#[test]
fn empty_store_operations() {
    let mut store = PointCloudStore::new();
    store.remove_colors();
    store.remove_reflectances();
    store.add_colors();
    assert!(store.has_colors());
    assert!(store.colors_to_array().unwrap().is_empty());
    assert!(store.positions_to_array().is_empty());
    assert!(store.iter_points().next().is_none());
    store.clear();
    assert!(!store.has_colors());
}

#[test]
fn set_positions_with_empty_slice_empties_store() {
    let mut store = PointCloudStore::from_positions(vec![[1.0, 1.0, 1.0]]);
    store.add_reflectances();
    store.set_positions(&[]).unwrap();
    assert!(store.is_empty());
    assert!(store.reflectance_slice().unwrap().is_empty());
}

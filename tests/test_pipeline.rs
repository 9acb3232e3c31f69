use ptio::{
    pcread, pcwrite, read_with, write_with, PlyFormat, PointCloudStore, ReadOptions,
    WriteOptions,
};

/// End-to-end: flat arrays → file → store edits → file in the other format → flat arrays
#[test]
fn pipeline_write_edit_convert_read() {
    let dir = tempfile::tempdir().unwrap();
    let ascii_path = dir.path().join("scan.ply");
    let binary_path = dir.path().join("out").join("scan_bin.ply");

    // A 4×4 grid scanned at z = 1 with a gradient intensity
    let mut points = Vec::new();
    let mut colors = Vec::new();
    let mut reflectance = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            points.extend_from_slice(&[i as f64 * 0.25, j as f64 * 0.25, 1.0]);
            colors.extend_from_slice(&[(i * 60) as u8, (j * 60) as u8, 200]);
            reflectance.push((i * 4 + j) as u16 * 1000);
        }
    }

    // Step 1: write with the flat-array helper
    let written = pcwrite(
        &ascii_path,
        &points,
        Some(colors.as_slice()),
        Some(reflectance.as_slice()),
        PlyFormat::Ascii,
    )
    .unwrap();
    assert_eq!(written.len(), 16);

    // Step 2: read into a store, working in millimetres
    let mut store =
        read_with(&ascii_path, &ReadOptions::default().with_position_scale(1000.0)).unwrap();
    assert_eq!(store.len(), 16);
    assert_eq!(store.position(5).unwrap(), [250.0, 250.0, 1000.0]);
    assert_eq!(store.color(5).unwrap(), [60, 60, 200]);

    // Step 3: drop reflectance, grow by one point, recolor it
    store.remove_reflectances();
    store.resize(17);
    store.set_position(16, [500.0, 500.0, 2000.0]).unwrap();
    store.set_color(16, [255, 255, 255]).unwrap();

    // Step 4: write back in metres as binary
    let options = WriteOptions::default()
        .with_position_scale(1000.0)
        .with_format(PlyFormat::BinaryLittleEndian);
    std::fs::create_dir_all(binary_path.parent().unwrap()).unwrap();
    write_with(&store, &binary_path, &options).unwrap();

    // Step 5: read as flat arrays
    let data = pcread(&binary_path, true).unwrap();
    assert_eq!(data.len(), 17);
    assert!(data.reflectance.is_none());
    assert_eq!(&data.points[48..51], &[0.5, 0.5, 2.0]);
    let rgb = data.colors.unwrap();
    assert_eq!(&rgb[..3], &colors[..3]);
    assert_eq!(&rgb[48..], &[255u8, 255, 255]);
}

/// Re-reading after `clear` behaves like a fresh store
#[test]
fn clear_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.ply");
    let rgb: &[u8] = &[9, 8, 7];
    pcwrite(&path, &[1.0, 2.0, 3.0], Some(rgb), None, PlyFormat::BinaryLittleEndian).unwrap();

    let mut store = read_with(&path, &ReadOptions::default()).unwrap();
    store.clear();
    assert_eq!(store, PointCloudStore::new());

    store = read_with(&path, &ReadOptions::default()).unwrap();
    assert_eq!(store.colors_to_array().unwrap(), vec![9, 8, 7]);
}

use ptio::{read_with, write_with, PlyFormat, PointCloudStore, ReadOptions, WriteOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // A small helix with a color ramp and a reflectance ramp
    let n = 1000;
    let mut store = PointCloudStore::new();
    let positions: Vec<f64> = (0..n)
        .flat_map(|i| {
            let t = i as f64 * 0.05;
            [t.cos(), t.sin(), t * 0.1]
        })
        .collect();
    store.set_positions(&positions)?;
    let colors: Vec<u8> = (0..n)
        .flat_map(|i| [(i % 256) as u8, 128, (255 - i % 256) as u8])
        .collect();
    store.set_colors(&colors)?;
    let reflectance: Vec<u16> = (0..n).map(|i| (i * 60) as u16).collect();
    store.set_reflectances(&reflectance)?;
    info!(points = store.len(), "built helix store");

    let dir = std::env::temp_dir().join("ptio_demo");
    std::fs::create_dir_all(&dir)?;

    for (name, format) in [
        ("helix_ascii.ply", PlyFormat::Ascii),
        ("helix_binary.ply", PlyFormat::BinaryLittleEndian),
    ] {
        let path = dir.join(name);
        // file holds millimetres
        let options = WriteOptions::default()
            .with_position_scale(1e-3)
            .with_format(format);
        write_with(&store, &path, &options)?;

        let loaded = read_with(&path, &ReadOptions::default().with_position_scale(1e-3))?;
        let size = std::fs::metadata(&path)?.len();
        info!(
            path = %path.display(),
            bytes = size,
            points = loaded.len(),
            colors = loaded.has_colors(),
            reflectance = loaded.has_reflectances(),
            "round trip complete"
        );
    }

    Ok(())
}

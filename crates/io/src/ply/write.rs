use super::scalar::ScalarType;
use super::{PlyFormat, PropertyNameMap, WriteOptions, COLOR_NAMES, REFLECTANCE_NAMES};
use crate::error::{check_scale, PlyError, Result};
use ptio_core::PointCloudStore;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes `store` as a PLY file.
///
/// Each position component is emitted as `stored / position_scale - offset`.
/// Colors and reflectance are written only when the store carries them.
/// A failed write leaves whatever was already written on disk.
pub fn write(
    store: &PointCloudStore,
    names: &PropertyNameMap,
    position_scale: f64,
    offset: [f64; 3],
    path: impl AsRef<Path>,
    format: PlyFormat,
) -> Result<()> {
    let options = WriteOptions {
        names: names.clone(),
        position_scale,
        offset,
        format,
    };
    write_with(store, path, &options)
}

pub fn write_with(
    store: &PointCloudStore,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<()> {
    validate(store, options)?;
    let path = path.as_ref();
    debug!(
        path = %path.display(),
        points = store.len(),
        format = ?options.format,
        "writing PLY file"
    );
    let file = fs::File::create(path)?;
    encode_into(store, BufWriter::new(file), options)
}

/// Encodes `store` into any writer. The writer is flushed on success and
/// untouched when the options are rejected.
pub fn write_to<W: Write>(
    store: &PointCloudStore,
    writer: W,
    options: &WriteOptions,
) -> Result<()> {
    validate(store, options)?;
    encode_into(store, writer, options)
}

/// Rejects a scale or a set of position names that would produce a file
/// this crate cannot read back.
fn validate(store: &PointCloudStore, options: &WriteOptions) -> Result<()> {
    check_scale(options.position_scale)?;

    let position = &options.names.position;
    for (i, name) in position.iter().enumerate() {
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.chars().any(char::is_whitespace) {
            Some("name contains whitespace")
        } else if position[..i].contains(name) {
            Some("name is used by more than one position component")
        } else if store.has_colors() && COLOR_NAMES.contains(&name.as_str()) {
            Some("name is reserved for colors")
        } else if store.has_reflectances() && name == REFLECTANCE_NAMES[0] {
            Some("name is reserved for reflectance")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(PlyError::InvalidPropertyName {
                name: name.clone(),
                reason,
            });
        }
    }
    Ok(())
}

fn encode_into<W: Write>(
    store: &PointCloudStore,
    mut writer: W,
    options: &WriteOptions,
) -> Result<()> {
    write_header(&mut writer, store, options)?;

    let colors = store.color_slice().ok();
    let reflectances = store.reflectance_slice().ok();
    let scale = options.position_scale;
    let offset = options.offset;

    for (i, p) in store.positions().iter().enumerate() {
        let out = [
            p[0] / scale - offset[0],
            p[1] / scale - offset[1],
            p[2] / scale - offset[2],
        ];
        match options.format {
            PlyFormat::Ascii => {
                write!(
                    writer,
                    "{} {} {}",
                    AsciiFloat(out[0]),
                    AsciiFloat(out[1]),
                    AsciiFloat(out[2])
                )?;
                if let Some(colors) = colors {
                    let [r, g, b] = colors[i].to_rgb();
                    write!(writer, " {} {} {}", r, g, b)?;
                }
                if let Some(reflectances) = reflectances {
                    write!(writer, " {}", reflectances[i])?;
                }
                writer.write_all(b"\n")?;
            }
            PlyFormat::BinaryLittleEndian => {
                for v in out {
                    writer.write_all(&v.to_le_bytes())?;
                }
                if let Some(colors) = colors {
                    writer.write_all(&colors[i].to_rgb())?;
                }
                if let Some(reflectances) = reflectances {
                    writer.write_all(&reflectances[i].to_le_bytes())?;
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Shortest round-trip text, switching to exponent form for very large
/// or very small magnitudes.
struct AsciiFloat(f64);

impl fmt::Display for AsciiFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if magnitude.is_finite() && magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
            write!(f, "{:e}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn write_header<W: Write>(
    w: &mut W,
    store: &PointCloudStore,
    options: &WriteOptions,
) -> Result<()> {
    writeln!(w, "ply")?;
    writeln!(w, "format {} 1.0", options.format.header_token())?;
    writeln!(w, "element vertex {}", store.len())?;
    for name in &options.names.position {
        writeln!(w, "property {} {}", ScalarType::Float64.name(), name)?;
    }
    if store.has_colors() {
        for name in COLOR_NAMES {
            writeln!(w, "property {} {}", ScalarType::Uint8.name(), name)?;
        }
    }
    if store.has_reflectances() {
        writeln!(
            w,
            "property {} {}",
            ScalarType::Uint16.name(),
            REFLECTANCE_NAMES[0]
        )?;
    }
    writeln!(w, "end_header")?;
    Ok(())
}

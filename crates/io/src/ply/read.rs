use super::header::{parse_header, ElementDecl, PropertyKind};
use super::scalar::{clamp_unsigned, ScalarType};
use super::{PlyFormat, PropertyNameMap, ReadOptions, COLOR_NAMES, REFLECTANCE_NAMES};
use crate::error::{check_scale, malformed, PlyError, Result};
use ptio_core::PointCloudStore;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Reads the `vertex` element of a PLY file into a new store.
///
/// Every decoded position component is multiplied by `position_scale`.
pub fn read(
    path: impl AsRef<Path>,
    names: &PropertyNameMap,
    position_scale: f64,
) -> Result<PointCloudStore> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PlyError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PlyError::Io(e),
    })?;
    debug!(path = %path.display(), bytes = data.len(), "reading PLY file");
    read_bytes(&data, names, position_scale)
}

pub fn read_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<PointCloudStore> {
    read(path, &options.names, options.position_scale)
}

/// Same as [`read`], for a PLY file already held in memory.
pub fn read_bytes(
    data: &[u8],
    names: &PropertyNameMap,
    position_scale: f64,
) -> Result<PointCloudStore> {
    check_scale(position_scale)?;
    let header = parse_header(data)?;
    let vertex_idx = header
        .vertex_element()
        .ok_or_else(|| malformed("no vertex element declared"))?;
    let vertex = &header.elements[vertex_idx];
    let layout = VertexLayout::resolve(vertex, names)?;

    debug!(
        format = ?header.format,
        vertices = vertex.count,
        properties = vertex.properties.len(),
        colors = layout.color.is_some(),
        reflectance = layout.reflectance.is_some(),
        "parsed PLY header"
    );

    let body = &data[header.body_offset..];
    let preceding = &header.elements[..vertex_idx];
    let mut sink = VertexSink::new(&layout, position_scale);
    match header.format {
        PlyFormat::Ascii => read_ascii(body, preceding, vertex, &mut sink)?,
        PlyFormat::BinaryLittleEndian => read_binary(body, preceding, vertex, &mut sink)?,
    }
    Ok(sink.finish())
}

/// Where each consumed attribute sits in a vertex record.
#[derive(Debug)]
struct VertexLayout {
    types: Vec<ScalarType>,
    position: [usize; 3],
    color: Option<[usize; 3]>,
    reflectance: Option<usize>,
}

impl VertexLayout {
    fn resolve(vertex: &ElementDecl, names: &PropertyNameMap) -> Result<Self> {
        let mut types = Vec::with_capacity(vertex.properties.len());
        for prop in &vertex.properties {
            match prop.kind {
                PropertyKind::Scalar(ty) => types.push(ty),
                PropertyKind::List { .. } => {
                    return Err(malformed(format!(
                        "list property '{}' in vertex element is not supported",
                        prop.name
                    )));
                }
            }
        }

        let find = |name: &str| vertex.properties.iter().position(|p| p.name == name);

        let mut position = [0usize; 3];
        for (slot, name) in position.iter_mut().zip(&names.position) {
            *slot = find(name.as_str())
                .ok_or_else(|| PlyError::MissingRequiredProperty(name.clone()))?;
        }

        let color = match COLOR_NAMES.map(find) {
            [Some(r), Some(g), Some(b)] => Some([r, g, b]),
            [None, None, None] => None,
            partial => {
                warn!(
                    red = partial[0].is_some(),
                    green = partial[1].is_some(),
                    blue = partial[2].is_some(),
                    "PLY declares only some color channels, ignoring colors"
                );
                None
            }
        };

        let reflectance = vertex
            .properties
            .iter()
            .position(|p| REFLECTANCE_NAMES.contains(&p.name.as_str()));

        Ok(Self {
            types,
            position,
            color,
            reflectance,
        })
    }

    fn stride(&self) -> usize {
        self.types.iter().map(|t| t.size()).sum()
    }
}

/// Accumulates decoded vertex records into a store.
struct VertexSink<'a> {
    layout: &'a VertexLayout,
    scale: f64,
    store: PointCloudStore,
    clamped: usize,
}

impl<'a> VertexSink<'a> {
    fn new(layout: &'a VertexLayout, scale: f64) -> Self {
        let mut store = PointCloudStore::new();
        if layout.color.is_some() {
            store.add_colors();
        }
        if layout.reflectance.is_some() {
            store.add_reflectances();
        }
        Self {
            layout,
            scale,
            store,
            clamped: 0,
        }
    }

    fn push(&mut self, row: &[f64]) -> Result<()> {
        let i = self.store.len();
        self.store.resize(i + 1);

        let [x, y, z] = self.layout.position;
        let scale = self.scale;
        self.store
            .set_position(i, [row[x] * scale, row[y] * scale, row[z] * scale])?;

        if let Some(channels) = self.layout.color {
            let rgb = channels.map(|c| self.channel(row[c], u8::MAX as u16) as u8);
            self.store.set_color(i, rgb)?;
        }
        if let Some(r) = self.layout.reflectance {
            let value = self.channel(row[r], u16::MAX);
            self.store.set_reflectance(i, value)?;
        }
        Ok(())
    }

    fn channel(&mut self, value: f64, max: u16) -> u16 {
        let (v, clamped) = clamp_unsigned(value, max);
        if clamped {
            self.clamped += 1;
        }
        v
    }

    fn finish(self) -> PointCloudStore {
        if self.clamped > 0 {
            warn!(
                values = self.clamped,
                "clamped out-of-range color or reflectance values"
            );
        }
        debug!(points = self.store.len(), "decoded PLY vertices");
        self.store
    }
}

fn read_ascii(
    body: &[u8],
    preceding: &[ElementDecl],
    vertex: &ElementDecl,
    sink: &mut VertexSink<'_>,
) -> Result<()> {
    let mut lines = body
        .split(|&b| b == b'\n')
        .filter(|line| !line.iter().all(|b| b.is_ascii_whitespace()));

    // one record per line, whatever the element
    for element in preceding {
        for _ in 0..element.count {
            if lines.next().is_none() {
                return Err(PlyError::TruncatedData {
                    expected: vertex.count,
                    found: 0,
                });
            }
        }
    }

    let layout = sink.layout;
    let types = &layout.types;
    let mut row = vec![0.0; types.len()];
    for record in 0..vertex.count {
        let line = lines.next().ok_or(PlyError::TruncatedData {
            expected: vertex.count,
            found: record,
        })?;
        let line = std::str::from_utf8(line).map_err(|_| PlyError::InvalidValue {
            record,
            property: vertex.properties[0].name.clone(),
            message: "row is not valid UTF-8".to_string(),
        })?;

        let mut tokens = line.split_ascii_whitespace();
        for ((slot, ty), prop) in row.iter_mut().zip(types).zip(&vertex.properties) {
            let token = tokens.next().ok_or_else(|| PlyError::InvalidValue {
                record,
                property: prop.name.clone(),
                message: format!("row has fewer than {} values", types.len()),
            })?;
            *slot = ty.parse_ascii(token).map_err(|message| PlyError::InvalidValue {
                record,
                property: prop.name.clone(),
                message,
            })?;
        }
        sink.push(&row)?;
    }
    Ok(())
}

fn read_binary(
    body: &[u8],
    preceding: &[ElementDecl],
    vertex: &ElementDecl,
    sink: &mut VertexSink<'_>,
) -> Result<()> {
    let mut offset = 0;
    for element in preceding {
        offset = skip_binary_element(body, offset, element).ok_or(PlyError::TruncatedData {
            expected: vertex.count,
            found: 0,
        })?;
    }

    let layout = sink.layout;
    let stride = layout.stride();
    let rest = &body[offset..];
    let available = rest.len() / stride;
    if available < vertex.count {
        return Err(PlyError::TruncatedData {
            expected: vertex.count,
            found: available,
        });
    }

    let mut row = vec![0.0; layout.types.len()];
    for record in rest.chunks_exact(stride).take(vertex.count) {
        let mut at = 0;
        for (slot, ty) in row.iter_mut().zip(&layout.types) {
            *slot = ty.decode_le(&record[at..]);
            at += ty.size();
        }
        sink.push(&row)?;
    }
    Ok(())
}

/// Returns the offset just past every record of `element`, or `None` if
/// the body ends first.
fn skip_binary_element(body: &[u8], offset: usize, element: &ElementDecl) -> Option<usize> {
    let has_lists = element
        .properties
        .iter()
        .any(|p| matches!(p.kind, PropertyKind::List { .. }));

    if !has_lists {
        let stride: usize = element
            .properties
            .iter()
            .map(|p| match p.kind {
                PropertyKind::Scalar(ty) => ty.size(),
                PropertyKind::List { .. } => 0,
            })
            .sum();
        let end = offset.checked_add(element.count.checked_mul(stride)?)?;
        return (end <= body.len()).then_some(end);
    }

    let mut offset = offset;
    for _ in 0..element.count {
        for prop in &element.properties {
            match prop.kind {
                PropertyKind::Scalar(ty) => offset += ty.size(),
                PropertyKind::List { count, item } => {
                    let len_bytes = body.get(offset..offset + count.size())?;
                    let len = count.decode_le(len_bytes).max(0.0) as usize;
                    offset += count.size();
                    offset = offset.checked_add(len.checked_mul(item.size())?)?;
                }
            }
        }
        if offset > body.len() {
            return None;
        }
    }
    Some(offset)
}

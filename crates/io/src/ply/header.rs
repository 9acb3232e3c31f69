use super::scalar::ScalarType;
use super::PlyFormat;
use crate::error::{malformed, PlyError, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PropertyKind {
    Scalar(ScalarType),
    List { count: ScalarType, item: ScalarType },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PropertyDecl {
    pub name: String,
    pub kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ElementDecl {
    pub name: String,
    pub count: usize,
    pub properties: Vec<PropertyDecl>,
}

/// Parsed header information.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Header {
    pub format: PlyFormat,
    pub elements: Vec<ElementDecl>,
    /// Byte offset just after the `end_header` line.
    pub body_offset: usize,
}

impl Header {
    pub fn vertex_element(&self) -> Option<usize> {
        self.elements.iter().position(|e| e.name == "vertex")
    }
}

/// Splits off the next line, returning it without its terminator along
/// with the offset of the following line.
fn next_line(data: &[u8], start: usize) -> Option<(&[u8], usize)> {
    if start >= data.len() {
        return None;
    }
    let rest = &data[start..];
    let (line, next) = match rest.iter().position(|&b| b == b'\n') {
        Some(nl) => (&rest[..nl], start + nl + 1),
        None => (rest, data.len()),
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some((line, next))
}

pub(crate) fn parse_header(data: &[u8]) -> Result<Header> {
    let mut offset = 0;
    let mut format = None;
    let mut elements: Vec<ElementDecl> = Vec::new();
    let mut seen_ply_magic = false;

    loop {
        let (raw, next) =
            next_line(data, offset).ok_or_else(|| malformed("missing end_header"))?;
        offset = next;

        let line = std::str::from_utf8(raw)
            .map_err(|_| malformed("header is not valid UTF-8"))?
            .trim();

        if !seen_ply_magic {
            if line == "ply" {
                seen_ply_magic = true;
                continue;
            }
            return Err(malformed("file does not start with 'ply'"));
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.first().copied() {
            None | Some("comment") | Some("obj_info") => {}
            Some("end_header") => break,
            Some("format") => {
                if format.is_some() {
                    return Err(malformed("duplicate format line"));
                }
                format = Some(parse_format(&parts)?);
            }
            Some("element") => {
                let (name, count) = match parts.as_slice() {
                    [_, name, count] => (name, count),
                    _ => return Err(malformed(format!("invalid element line: {}", line))),
                };
                let count = count.parse::<usize>().map_err(|e| {
                    malformed(format!("invalid count for element '{}': {}", name, e))
                })?;
                elements.push(ElementDecl {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            Some("property") => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| malformed("property declared before any element"))?;
                element.properties.push(parse_property(&parts, line)?);
            }
            Some(other) => {
                return Err(malformed(format!("unexpected header keyword '{}'", other)));
            }
        }
    }

    let format = format.ok_or_else(|| malformed("PLY format line missing"))?;

    let header = Header {
        format,
        elements,
        body_offset: offset,
    };
    if header.vertex_element().is_none() {
        return Err(malformed("no vertex element declared"));
    }
    Ok(header)
}

fn parse_format(parts: &[&str]) -> Result<PlyFormat> {
    let (token, version) = match parts {
        [_, token, version] => (*token, *version),
        _ => return Err(malformed(format!("invalid format line: {}", parts.join(" ")))),
    };
    if version != "1.0" {
        return Err(malformed(format!("unsupported PLY version {}", version)));
    }
    match token {
        "ascii" => Ok(PlyFormat::Ascii),
        "binary_little_endian" => Ok(PlyFormat::BinaryLittleEndian),
        "binary_big_endian" => Err(PlyError::UnsupportedFormat(token.to_string())),
        other => Err(malformed(format!("unknown format '{}'", other))),
    }
}

fn parse_property(parts: &[&str], line: &str) -> Result<PropertyDecl> {
    let scalar = |token: &str| {
        ScalarType::parse(token)
            .ok_or_else(|| malformed(format!("unsupported property type '{}'", token)))
    };

    match parts {
        [_, "list", count, item, name] => Ok(PropertyDecl {
            name: name.to_string(),
            kind: PropertyKind::List {
                count: scalar(*count)?,
                item: scalar(*item)?,
            },
        }),
        [_, ty, name] if *ty != "list" => Ok(PropertyDecl {
            name: name.to_string(),
            kind: PropertyKind::Scalar(scalar(*ty)?),
        }),
        _ => Err(malformed(format!("invalid property line: {}", line))),
    }
}

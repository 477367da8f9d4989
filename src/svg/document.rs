use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path as FsPath;
use thiserror::Error;

use crate::path::{ParseError, Path, parse};

/// Errors from reading an SVG document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no <svg> root element")]
    MissingRoot,

    #[error("<svg> is missing the {0:?} attribute")]
    MissingAttribute(&'static str),

    #[error("invalid {attribute} value {value:?}")]
    InvalidLength {
        attribute: &'static str,
        value: String,
    },

    #[error("invalid viewBox {0:?}")]
    InvalidViewBox(String),

    #[error("path {index}: {source}")]
    Path {
        index: usize,
        #[source]
        source: ParseError,
    },
}

impl From<quick_xml::events::attributes::AttrError> for DocumentError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocumentError::Xml(err.into())
    }
}

/// The `viewBox` coordinate space of a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Physical size, coordinate space and path strings of one SVG document
#[derive(Debug, Clone)]
pub struct Document {
    /// Declared width in mm
    pub width_mm: f64,
    /// Declared height in mm
    pub height_mm: f64,
    pub view_box: ViewBox,
    /// `d` attributes of every `<path>`, in document order
    pub path_data: Vec<String>,
}

impl Document {
    /// Divisors that turn viewBox units into mm: (x_scale, y_scale)
    pub fn scale(&self) -> (f64, f64) {
        (
            self.view_box.width / self.width_mm,
            self.view_box.height / self.height_mm,
        )
    }

    /// Parse every path in the document, failing on the first bad one
    pub fn paths(&self) -> Result<Vec<Path>, DocumentError> {
        let (x_scale, y_scale) = self.scale();
        self.path_data
            .iter()
            .enumerate()
            .map(|(index, d)| {
                parse(d, x_scale, y_scale).map_err(|source| DocumentError::Path { index, source })
            })
            .collect()
    }
}

/// Load an SVG file from disk
pub fn load_file(path: &FsPath) -> Result<Document, DocumentError> {
    let xml = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_document(&xml)
}

/// Read the root size attributes and all path strings from SVG text
pub fn load_document(xml: &str) -> Result<Document, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<(f64, f64, ViewBox)> = None;
    let mut path_data = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"svg" if root.is_none() => root = Some(read_root(&e)?),
                b"path" => {
                    if let Some(d) = attribute(&e, b"d")? {
                        path_data.push(d);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let (width_mm, height_mm, view_box) = root.ok_or(DocumentError::MissingRoot)?;

    Ok(Document {
        width_mm,
        height_mm,
        view_box,
        path_data,
    })
}

fn read_root(e: &BytesStart<'_>) -> Result<(f64, f64, ViewBox), DocumentError> {
    let width = attribute(e, b"width")?.ok_or(DocumentError::MissingAttribute("width"))?;
    let height = attribute(e, b"height")?.ok_or(DocumentError::MissingAttribute("height"))?;
    let view_box = attribute(e, b"viewBox")?.ok_or(DocumentError::MissingAttribute("viewBox"))?;

    Ok((
        parse_length("width", &width)?,
        parse_length("height", &height)?,
        parse_view_box(&view_box)?,
    ))
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, DocumentError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// A positive length in mm, with or without the `mm` suffix
fn parse_length(attribute: &'static str, value: &str) -> Result<f64, DocumentError> {
    let invalid = || DocumentError::InvalidLength {
        attribute,
        value: value.to_string(),
    };
    let number = value.trim();
    let number = number.strip_suffix("mm").unwrap_or(number).trim();
    let length: f64 = number.parse().map_err(|_| invalid())?;

    if length.is_finite() && length > 0.0 {
        Ok(length)
    } else {
        Err(invalid())
    }
}

fn parse_view_box(value: &str) -> Result<ViewBox, DocumentError> {
    let invalid = || DocumentError::InvalidViewBox(value.to_string());
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;

    let [min_x, min_y, width, height] = numbers[..] else {
        return Err(invalid());
    };
    if width <= 0.0 || height <= 0.0 {
        return Err(invalid());
    }

    Ok(ViewBox {
        min_x,
        min_y,
        width,
        height,
    })
}

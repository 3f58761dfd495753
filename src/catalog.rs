//! Fixed-width value decoders and the typed read operation.
//!
//! The catalog is a static table of named decoders. [`read`] walks a list
//! of type names over the bytes under a pane's cursor, advancing the cursor
//! past each decoded value.

use std::fmt;

use thiserror::Error;

use crate::pane::PaneView;

/// Byte order used for multi-byte values.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// One named decoder.
#[derive(Clone, Copy)]
pub struct TypeSpec {
    pub name: &'static str,
    pub width: usize,
    decode: fn(&[u8], Endian) -> String,
}

impl TypeSpec {
    /// Decode exactly `self.width` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not `self.width` long.
    pub fn decode(&self, bytes: &[u8], endian: Endian) -> String {
        assert_eq!(bytes.len(), self.width, "{} needs {} bytes", self.name, self.width);
        (self.decode)(bytes, endian)
    }
}

impl fmt::Debug for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSpec")
            .field("name", &self.name)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

macro_rules! decoder {
    ($ty:ty, $width:literal) => {
        |bytes: &[u8], endian: Endian| {
            let mut raw = [0u8; $width];
            raw.copy_from_slice(bytes);
            let value = match endian {
                Endian::Little => <$ty>::from_le_bytes(raw),
                Endian::Big => <$ty>::from_be_bytes(raw),
            };
            value.to_string()
        }
    };
}

static CATALOG: &[TypeSpec] = &[
    TypeSpec { name: "f32", width: 4, decode: decoder!(f32, 4) },
    TypeSpec { name: "u8", width: 1, decode: decoder!(u8, 1) },
    TypeSpec { name: "i8", width: 1, decode: decoder!(i8, 1) },
    TypeSpec { name: "u16", width: 2, decode: decoder!(u16, 2) },
    TypeSpec { name: "i16", width: 2, decode: decoder!(i16, 2) },
    TypeSpec { name: "u32", width: 4, decode: decoder!(u32, 4) },
    TypeSpec { name: "i32", width: 4, decode: decoder!(i32, 4) },
];

/// All decoders, in display order.
pub fn catalog() -> &'static [TypeSpec] {
    CATALOG
}

/// Find a decoder by name.
pub fn lookup(name: &str) -> Option<&'static TypeSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

/// Space separated list of the known type names.
pub fn names() -> String {
    CATALOG
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("No such data type: {0}")]
    UnknownType(String),
    #[error("Nothing to read")]
    NoTypes,
}

/// Values produced by one [`read`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadReport {
    pub values: Vec<String>,
    /// The read stopped because the next value ran past the end.
    pub eof: bool,
}

impl fmt::Display for ReadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = self.values.iter().map(String::as_str).collect();
        if self.eof {
            parts.push("EOF");
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Decode `names` in order, `repeat` times, starting at the view's cursor.
///
/// Each value moves the cursor past its bytes and the selection takes the
/// width of the last value read. Values read before hitting the end of the
/// buffer stay applied.
///
/// # Errors
///
/// Returns [`ReadError::UnknownType`] before touching the view if any name
/// is not in the catalog.
pub fn read<S: AsRef<str>>(
    view: &mut PaneView,
    bytes: &[u8],
    names: &[S],
    repeat: usize,
    endian: Endian,
) -> Result<ReadReport, ReadError> {
    if names.is_empty() {
        return Err(ReadError::NoTypes);
    }
    let specs = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            lookup(name).ok_or_else(|| ReadError::UnknownType(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = ReadReport::default();
    let mut cursor = view.cursor();
    let mut extent = view.extent();
    'outer: for _ in 0..repeat {
        for spec in &specs {
            if cursor + spec.width > bytes.len() {
                report.eof = true;
                break 'outer;
            }
            report
                .values
                .push(spec.decode(&bytes[cursor..cursor + spec.width], endian));
            extent = spec.width;
            cursor += spec.width;
        }
    }
    if !report.values.is_empty() {
        let len = bytes.len();
        if cursor < len {
            // Next value starts here; the selection is cut at the end.
            view.select(cursor, extent.min(len - cursor), len);
        } else {
            // Read up to the last byte: keep the final value selected.
            view.select(len - extent, extent, len);
        }
    }
    Ok(report)
}

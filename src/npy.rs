//! Minimal NumPy `.npy` support for 2D `f64` arrays.
//!
//! Files are written as format version 1.0, `'<f8'`, C order,
//! so `numpy.load` returns the grid with the same shape and layout.

use crate::domain::*;
use crate::error::{Error, Result};
use crate::util::*;
use std::io::prelude::*;

const MAGIC: &[u8] = b"\x93NUMPY";
const HEADER_ALIGNMENT: usize = 64;

fn header_text(shape: [usize; 2]) -> String {
    let dict = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({}, {}), }}",
        shape[0], shape[1]
    );
    // magic + version + u16 length + dict + '\n' lands on the alignment
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = (HEADER_ALIGNMENT - unpadded % HEADER_ALIGNMENT) % HEADER_ALIGNMENT;
    format!("{dict}{}\n", " ".repeat(padding))
}

/// Encode `domain` as a complete `.npy` file.
pub fn write_npy_to<W: Write, DomainType: DomainView<2>>(
    writer: &mut W,
    domain: &DomainType,
) -> Result<()> {
    let header = header_text(domain.aabb().shape());
    let header_len = u16::try_from(header.len())
        .map_err(|_| Error::Npy("header too long".to_string()))?;
    writer.write_all(MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(header.as_bytes())?;
    if cfg!(target_endian = "little") {
        writer.write_all(bytemuck::cast_slice(domain.buffer()))?;
    } else {
        for v in domain.buffer() {
            writer.write_all(&v.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Write `domain` to `path`, replacing whatever is there.
pub fn write_npy<P: AsRef<std::path::Path>, DomainType: DomainView<2>>(
    path: &P,
    domain: &DomainType,
) -> Result<()> {
    log::info!("Writing: {:?}", path.as_ref());
    let file = std::fs::File::create(path)
        .map_err(|e| Error::file(path.as_ref(), e))?;
    let mut output = std::io::BufWriter::new(file);
    write_npy_to(&mut output, domain)?;
    output.flush()?;
    Ok(())
}

/// Pull the value of `key` out of a header dict, up to the next `,` or `)`.
fn header_value<'a>(header: &'a str, key: &str) -> Result<&'a str> {
    let pattern = format!("'{key}':");
    let start = header
        .find(&pattern)
        .ok_or_else(|| Error::Npy(format!("header has no {key}")))?
        + pattern.len();
    let rest = header[start..].trim_start();
    let end = if rest.starts_with('(') {
        rest.find(')').map(|i| i + 1)
    } else {
        rest.find([',', '}'])
    }
    .ok_or_else(|| Error::Npy(format!("unterminated {key}")))?;
    Ok(rest[..end].trim())
}

/// Parse a `(rows, cols)` tuple into a grid box.
fn parse_shape(text: &str) -> Result<AABB<2>> {
    let dims: Vec<usize> = text
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| Error::Npy(format!("bad dimension {s}")))
        })
        .collect::<Result<_>>()?;
    let shape = match dims.as_slice() {
        [rows, cols] => [*rows, *cols],
        _ => return Err(Error::Npy(format!("expected a 2D shape, got {text}"))),
    };
    AABB::checked_from_shape(shape)
        .filter(|aabb| aabb.buffer_size().checked_mul(8).is_some())
        .ok_or_else(|| Error::Npy(format!("unsupported shape {text}")))
}

/// Decode a `.npy` file holding a 2D little endian `f64` array in C order.
pub fn read_npy_from<R: Read>(reader: &mut R) -> Result<OwnedDomain<2>> {
    let mut preamble = [0u8; 8];
    reader.read_exact(&mut preamble)?;
    if &preamble[0..6] != MAGIC {
        return Err(Error::Npy("bad magic".to_string()));
    }
    let header_len = match preamble[6] {
        1 => {
            let mut len = [0u8; 2];
            reader.read_exact(&mut len)?;
            u16::from_le_bytes(len) as usize
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            reader.read_exact(&mut len)?;
            u32::from_le_bytes(len) as usize
        }
        v => return Err(Error::Npy(format!("unsupported version {v}"))),
    };
    let mut header = vec![0u8; header_len];
    reader.read_exact(&mut header)?;
    let header = String::from_utf8(header)
        .map_err(|_| Error::Npy("header is not text".to_string()))?;

    let descr = header_value(&header, "descr")?;
    if descr != "'<f8'" {
        return Err(Error::Npy(format!("unsupported dtype {descr}")));
    }
    if header_value(&header, "fortran_order")? != "False" {
        return Err(Error::Npy("fortran order is not supported".to_string()));
    }
    let aabb = parse_shape(header_value(&header, "shape")?)?;

    // grows with the data actually present, not with the header's claim
    let expected = aabb.buffer_size() * 8;
    let mut bytes = Vec::new();
    reader.by_ref().take(expected as u64).read_to_end(&mut bytes)?;
    if bytes.len() != expected {
        return Err(Error::Npy(format!(
            "expected {expected} data bytes, found {}",
            bytes.len()
        )));
    }
    let buffer = bytes
        .chunks_exact(8)
        .map(|b| {
            let mut word = [0u8; 8];
            word.copy_from_slice(b);
            f64::from_le_bytes(word)
        })
        .collect();
    OwnedDomain::from_buffer(aabb, buffer)
}

pub fn read_npy<P: AsRef<std::path::Path>>(path: &P) -> Result<OwnedDomain<2>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::file(path.as_ref(), e))?;
    read_npy_from(&mut std::io::BufReader::new(file))
}

//! # UNV Export and Import
//!
//! I-DEAS universal file support for the two datasets a mesh needs:
//!
//! - **2411** nodes: `label, export cs, displacement cs, color` then three
//!   coordinates in `D25.16` notation
//! - **2412** elements: `label, FE id, physical, material, color, node count`,
//!   an extra beam record for rods, then node labels eight per line
//!
//! Datasets are framed by `    -1` lines. Node labels are 1-based indices.
//!
//! ## Example
//!
//! ```no_run
//! use mesh_engine::{unv, MeshData};
//!
//! let data = unv::read("part.unv")?;
//! unv::write(&data, "copy.unv")?;
//! # Ok::<(), mesh_engine::EngineError>(())
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::DVec3;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::mesh::{ElementKind, MeshData, NodeId};

const DELIMITER: &str = "    -1";
const NODES_DATASET: u32 = 2411;
const ELEMENTS_DATASET: u32 = 2412;

const FE_ROD: u32 = 11;
const FE_TRIANGLE: u32 = 91;
const FE_QUADRANGLE: u32 = 94;
const FE_TETRAHEDRON: u32 = 111;

/// Beam-type FE descriptors carry an extra orientation record.
const BEAM_DESCRIPTORS: [u32; 4] = [11, 21, 22, 24];

const LABELS_PER_LINE: usize = 8;

fn descriptor(kind: ElementKind) -> u32 {
    match kind {
        ElementKind::Segment => FE_ROD,
        ElementKind::Triangle => FE_TRIANGLE,
        ElementKind::Quadrangle => FE_QUADRANGLE,
        ElementKind::Tetrahedron => FE_TETRAHEDRON,
    }
}

fn kind_of(descriptor: u32) -> Option<ElementKind> {
    match descriptor {
        FE_ROD => Some(ElementKind::Segment),
        41 | 51 | 61 | 74 | 81 | FE_TRIANGLE => Some(ElementKind::Triangle),
        44 | 54 | 64 | 71 | 84 | FE_QUADRANGLE => Some(ElementKind::Quadrangle),
        FE_TETRAHEDRON => Some(ElementKind::Tetrahedron),
        _ => None,
    }
}

// =============================================================================
// WRITER
// =============================================================================

/// Writes `data` to `path` as a UNV file.
pub fn write(data: &MeshData, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_nodes(&mut out, data)?;
    write_elements(&mut out, data)?;
    out.flush()?;
    debug!(
        path = %path.display(),
        nodes = data.node_count(),
        elements = data.elements().len(),
        "UNV written"
    );
    Ok(())
}

fn write_nodes<W: Write>(out: &mut W, data: &MeshData) -> io::Result<()> {
    writeln!(out, "{DELIMITER}")?;
    writeln!(out, "{NODES_DATASET:>6}")?;
    for (index, p) in data.nodes().iter().enumerate() {
        writeln!(out, "{:>10}{:>10}{:>10}{:>10}", index + 1, 1, 1, 11)?;
        writeln!(
            out,
            "{:>25}{:>25}{:>25}",
            fortran_double(p.x),
            fortran_double(p.y),
            fortran_double(p.z)
        )?;
    }
    writeln!(out, "{DELIMITER}")
}

fn write_elements<W: Write>(out: &mut W, data: &MeshData) -> io::Result<()> {
    writeln!(out, "{DELIMITER}")?;
    writeln!(out, "{ELEMENTS_DATASET:>6}")?;
    for (index, element) in data.elements().iter().enumerate() {
        let fe = descriptor(element.kind);
        writeln!(
            out,
            "{:>10}{:>10}{:>10}{:>10}{:>10}{:>10}",
            index + 1,
            fe,
            2,
            1,
            7,
            element.nodes.len()
        )?;
        if BEAM_DESCRIPTORS.contains(&fe) {
            writeln!(out, "{:>10}{:>10}{:>10}", 0, 0, 0)?;
        }
        for chunk in element.nodes.chunks(LABELS_PER_LINE) {
            for node in chunk {
                write!(out, "{:>10}", node + 1)?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "{DELIMITER}")
}

/// Formats like Fortran `D25.16`: `1.0000000000000000D+00`.
fn fortran_double(value: f64) -> String {
    let formatted = format!("{value:.16E}");
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            format!("{mantissa}D{exponent:+03}")
        }
        None => formatted,
    }
}

// =============================================================================
// READER
// =============================================================================

/// Reads nodes and elements from a UNV file; other datasets are skipped.
pub fn read(path: impl AsRef<Path>) -> EngineResult<MeshData> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parses UNV text.
pub fn parse(text: &str) -> EngineResult<MeshData> {
    let mut lines = LineCursor::new(text);
    let mut data = MeshData::new();
    let mut labels: HashMap<u64, NodeId> = HashMap::new();

    while let Some(line) = lines.next() {
        if !is_delimiter(line) {
            continue;
        }
        let Some(header) = lines.next() else {
            break;
        };
        let dataset: u32 = lines.parse_field(header.trim())?;
        match dataset {
            NODES_DATASET => read_nodes(&mut lines, &mut data, &mut labels)?,
            ELEMENTS_DATASET => read_elements(&mut lines, &mut data, &labels)?,
            _ => skip_dataset(&mut lines)?,
        }
    }
    Ok(data)
}

fn read_nodes(
    lines: &mut LineCursor<'_>,
    data: &mut MeshData,
    labels: &mut HashMap<u64, NodeId>,
) -> EngineResult<()> {
    loop {
        let record = lines.expect_line()?;
        if is_delimiter(record) {
            return Ok(());
        }
        let label: u64 = lines.parse_field(first_field(record, lines.number())?)?;
        let coordinates = lines.expect_line()?;
        let values = coordinates
            .split_whitespace()
            .map(|field| lines.parse_field::<f64>(&field.replace(['D', 'd'], "E")))
            .collect::<EngineResult<Vec<_>>>()?;
        let [x, y, z] = values.as_slice() else {
            return Err(EngineError::invalid_unv(
                lines.number(),
                format!("expected 3 coordinates, found {}", values.len()),
            ));
        };
        labels.insert(label, data.add_node(DVec3::new(*x, *y, *z)));
    }
}

fn read_elements(
    lines: &mut LineCursor<'_>,
    data: &mut MeshData,
    labels: &HashMap<u64, NodeId>,
) -> EngineResult<()> {
    loop {
        let record = lines.expect_line()?;
        if is_delimiter(record) {
            return Ok(());
        }
        let fields = record
            .split_whitespace()
            .map(|field| lines.parse_field::<u64>(field))
            .collect::<EngineResult<Vec<_>>>()?;
        if fields.len() < 6 {
            return Err(EngineError::invalid_unv(lines.number(), "short element record"));
        }
        let fe = fields[1] as u32;
        let count = fields[5] as usize;
        let kind = kind_of(fe).ok_or_else(|| {
            EngineError::invalid_unv(lines.number(), format!("unsupported FE descriptor {fe}"))
        })?;
        if count != kind.node_count() {
            return Err(EngineError::invalid_unv(
                lines.number(),
                format!("{kind:?} declared with {count} nodes"),
            ));
        }
        if BEAM_DESCRIPTORS.contains(&fe) {
            lines.expect_line()?;
        }

        let mut nodes = Vec::with_capacity(count);
        while nodes.len() < count {
            let line = lines.expect_line()?;
            for field in line.split_whitespace() {
                let label: u64 = lines.parse_field(field)?;
                let node = labels.get(&label).copied().ok_or_else(|| {
                    EngineError::invalid_unv(lines.number(), format!("unknown node label {label}"))
                })?;
                nodes.push(node);
            }
        }
        if nodes.len() != kind.node_count() {
            return Err(EngineError::invalid_unv(
                lines.number(),
                format!("{kind:?} with {} nodes", nodes.len()),
            ));
        }
        data.add_element(kind, nodes);
    }
}

fn skip_dataset(lines: &mut LineCursor<'_>) -> EngineResult<()> {
    loop {
        if is_delimiter(lines.expect_line()?) {
            return Ok(());
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == "-1"
}

fn first_field(line: &str, number: usize) -> EngineResult<&str> {
    line.split_whitespace()
        .next()
        .ok_or_else(|| EngineError::invalid_unv(number, "empty record"))
}

/// Line iterator that remembers the current 1-based line number.
struct LineCursor<'a> {
    inner: std::str::Lines<'a>,
    number: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            number: 0,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let line = self.inner.next()?;
        self.number += 1;
        Some(line)
    }

    fn expect_line(&mut self) -> EngineResult<&'a str> {
        self.next()
            .ok_or_else(|| EngineError::invalid_unv(self.number, "unexpected end of file"))
    }

    fn number(&self) -> usize {
        self.number
    }

    fn parse_field<T: std::str::FromStr>(&self, field: &str) -> EngineResult<T> {
        field
            .parse()
            .map_err(|_| EngineError::invalid_unv(self.number, format!("cannot parse '{field}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fortran_double_format() {
        assert_eq!(fortran_double(1.0), "1.0000000000000000D+00");
        assert_eq!(fortran_double(-0.125), "-1.2500000000000000D-01");
        assert_eq!(fortran_double(0.0), "0.0000000000000000D+00");
        assert_eq!(fortran_double(2500.0), "2.5000000000000000D+03");
    }

    #[test]
    fn test_parse_node_and_rod() {
        let text = "\
    -1
  2411
         1         1         1        11
   0.0000000000000000D+00   0.0000000000000000D+00   0.0000000000000000D+00
         2         1         1        11
   1.5000000000000000D+00   0.0000000000000000D+00  -2.0000000000000000D+00
    -1
    -1
  2412
         1        11         2         1         7         2
         0         0         0
         1         2
    -1
";
        let data = parse(text).unwrap();
        assert_eq!(data.node_count(), 2);
        assert_relative_eq!(data.nodes()[1].x, 1.5);
        assert_relative_eq!(data.nodes()[1].z, -2.0);
        assert_eq!(data.elements().len(), 1);
        assert_eq!(data.elements()[0].kind, ElementKind::Segment);
        assert_eq!(data.elements()[0].nodes, vec![0, 1]);
    }

    #[test]
    fn test_unknown_datasets_are_skipped() {
        let text = "    -1\n   164\n  1 SI\n    -1\n";
        let data = parse(text).unwrap();
        assert_eq!(data.node_count(), 0);
    }

    #[test]
    fn test_unknown_node_label_is_rejected() {
        let text = "    -1\n  2412\n         1        91         2         1         7         3\n         1         2         3\n    -1\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, EngineError::InvalidUnv { line: 4, .. }));
    }

    #[test]
    fn test_node_count_field_is_checked_before_reading_labels() {
        let text = "    -1\n  2412\n         1        91         2         1         7 999999999999999999\n         1         2         3\n    -1\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, EngineError::InvalidUnv { line: 3, .. }));
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let text = "    -1\n  2411\n         1         1         1        11\n";
        assert!(matches!(parse(text).unwrap_err(), EngineError::InvalidUnv { .. }));
    }
}

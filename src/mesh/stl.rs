use super::Facet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// STL flavour to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Ascii,
    Binary,
}

/// Write facets to an STL file in the requested format
pub fn write_stl(path: &Path, format: StlFormat, name: &str, facets: &[Facet]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        StlFormat::Ascii => write_ascii_stl(&mut writer, name, facets)?,
        StlFormat::Binary => write_binary_stl(&mut writer, facets)?,
    }

    writer.flush()?;

    Ok(())
}

/// Write facets as an ASCII STL solid
///
/// ```text
/// solid <name>
///   facet normal nx ny nz
///     outer loop
///       vertex x y z   (x3)
///     endloop
///   endfacet
/// endsolid <name>
/// ```
pub fn write_ascii_stl<W: Write>(writer: &mut W, name: &str, facets: &[Facet]) -> Result<()> {
    writeln!(writer, "solid {}", name)?;

    for facet in facets {
        let [nx, ny, nz] = facet.normal;
        writeln!(writer, "  facet normal {:e} {:e} {:e}", nx, ny, nz)?;
        writeln!(writer, "    outer loop")?;
        for v in &facet.vertices {
            writeln!(writer, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {}", name)?;

    Ok(())
}

/// Write facets as a binary STL
///
/// Binary STL format:
/// - 80 byte header
/// - 4 byte u32 triangle count (little endian)
/// - For each triangle:
///   - 3 x f32 normal (12 bytes)
///   - 3 x 3 x f32 vertices (36 bytes)
///   - 2 byte attribute (usually 0)
pub fn write_binary_stl<W: Write>(writer: &mut W, facets: &[Facet]) -> Result<()> {
    let mut header = [b' '; 80];
    let banner = b"svg2stl - extruded SVG path";
    header[..banner.len()].copy_from_slice(banner);
    writer.write_all(&header)?;

    let count = u32::try_from(facets.len()).context("Too many facets for binary STL")?;
    writer.write_all(&count.to_le_bytes())?;

    for facet in facets {
        for &n in &facet.normal {
            writer.write_all(&(n as f32).to_le_bytes())?;
        }

        for vertex in &facet.vertices {
            for coord in vertex.to_array() {
                writer.write_all(&(coord as f32).to_le_bytes())?;
            }
        }

        writer.write_all(&[0u8, 0u8])?;
    }

    Ok(())
}

/// Get the file size of a binary STL with the given number of facets
pub fn estimate_binary_size(facet_count: usize) -> usize {
    // 80 (header) + 4 (count) + facets * (12 normal + 36 vertices + 2 attribute)
    80 + 4 + facet_count * 50
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Point3D, Triangle, facet_for};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample_facets() -> Vec<Facet> {
        let p = |x, y, z| Point3D::new(x, y, z);
        vec![
            facet_for(&Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0))),
            facet_for(&Triangle::new(p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0))),
        ]
    }

    #[test]
    fn test_write_binary_stl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.stl");

        write_stl(&path, StlFormat::Binary, "test", &sample_facets()).unwrap();

        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), estimate_binary_size(2) as u64);
    }

    #[test]
    fn test_binary_reads_back() {
        let mut buf = Vec::new();
        write_binary_stl(&mut buf, &sample_facets()).unwrap();

        let mesh = stl_io::read_stl(&mut Cursor::new(buf)).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert!((mesh.faces[0].normal[2] - 1.0).abs() < 1e-6);
        assert!((mesh.faces[1].normal[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ascii_layout() {
        let mut buf = Vec::new();
        write_ascii_stl(&mut buf, "part", &sample_facets()[..1]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).collect();

        assert_eq!(lines[0], "solid part");
        assert_eq!(lines[1], "facet normal 0e0 0e0 1e0");
        assert_eq!(lines[2], "outer loop");
        assert_eq!(lines[3], "vertex 0e0 0e0 0e0");
        assert_eq!(lines[4], "vertex 1e0 0e0 0e0");
        assert_eq!(lines[5], "vertex 0e0 1e0 0e0");
        assert_eq!(lines[6], "endloop");
        assert_eq!(lines[7], "endfacet");
        assert_eq!(lines[8], "endsolid part");
    }

    #[test]
    fn test_ascii_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ascii.stl");
        write_stl(&path, StlFormat::Ascii, "test", &sample_facets()).unwrap();

        let mut file = fs::File::open(&path).unwrap();
        let mesh = stl_io::read_stl(&mut file).unwrap();
        assert_eq!(mesh.faces.len(), 2);
    }

    #[test]
    fn test_estimate_size() {
        // Empty STL: 80 + 4 = 84 bytes
        assert_eq!(estimate_binary_size(0), 84);
        // 1 facet: 84 + 50 = 134 bytes
        assert_eq!(estimate_binary_size(1), 134);
    }
}

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;

use svg2stl::mesh::stl::write_binary_stl;
use svg2stl::mesh::{StlFormat, assemble, extrude, validate_facets, write_stl};
use svg2stl::path::{Point2D, parse};
use svg2stl::svg::load_document;
use tempfile::tempdir;

const DRAWING: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="40mm" height="40mm" viewBox="0 0 40 40">
  <g>
    <path d="M 0,0 L 10,0 10,10 0,10 z" />
    <path d="m 20,20 l 10,0 0,10 z" />
  </g>
</svg>"#;

#[test]
fn test_square_scenario() {
    let path = parse("M 0,0 L 10,0 10,10 0,10 z", 1.0, 1.0).unwrap();
    let facets = assemble(&extrude(&path, 5.0));

    assert_eq!(facets.len(), 12);
    let report = validate_facets(&facets);
    assert!(!report.has_issues());
}

#[test]
fn test_infinite_height_is_rejected_before_writing() {
    let path = parse("M 0,0 L 10,0 10,10 0,10 z", 1.0, 1.0).unwrap();
    let facets = assemble(&extrude(&path, f64::INFINITY));

    let report = validate_facets(&facets);
    assert!(!report.is_valid());
    assert!(report.invalid_coords > 0);
}

#[test]
fn test_relative_scenario() {
    let path = parse("m 0,0 l 10,0 0,10 z", 1.0, 1.0).unwrap();
    assert_eq!(
        path.sections()[0].points(),
        &[
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0)
        ]
    );
}

#[test]
fn test_two_point_section_scenario() {
    let path = parse("M 0,0 L 4,0 z", 1.0, 1.0).unwrap();
    let facets = assemble(&extrude(&path, 2.0));

    // One edge, no caps
    assert_eq!(facets.len(), 2);
    assert!(facets.iter().all(|f| !f.is_degenerate()));
}

#[test]
fn test_degenerate_edge_is_observable() {
    // Repeated point gives a zero-length edge
    let path = parse("M 0,0 L 5,0 5,0 5,5 z", 1.0, 1.0).unwrap();
    let facets = assemble(&extrude(&path, 1.0));
    let report = validate_facets(&facets);
    assert!(report.degenerate > 0);
}

#[test]
fn test_document_to_stl_files() {
    let document = load_document(DRAWING).unwrap();
    let paths = document.paths().unwrap();
    assert_eq!(paths.len(), 2);

    let dir = tempdir().unwrap();
    for (i, path) in paths.iter().enumerate() {
        let facets = assemble(&extrude(path, 3.0));
        let file = dir.path().join(format!("drawing_{}.stl", i));
        write_stl(&file, StlFormat::Ascii, "drawing", &facets).unwrap();

        let mut reader = fs::File::open(&file).unwrap();
        let mesh = stl_io::read_stl(&mut reader).unwrap();
        assert_eq!(mesh.faces.len(), facets.len());
    }
}

#[test]
fn test_extruded_cube_is_closed() {
    let path = parse("M 0,0 L 10,0 10,10 0,10 z", 1.0, 1.0).unwrap();
    let facets = assemble(&extrude(&path, 10.0));

    let mut buf = Vec::new();
    write_binary_stl(&mut buf, &facets).unwrap();
    let mesh = stl_io::read_stl(&mut Cursor::new(buf)).unwrap();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.faces.len(), 12);

    // Every directed edge is matched by its reverse in a neighbouring face
    let mut edges = HashMap::new();
    for face in &mesh.faces {
        let v = face.vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            *edges.entry((a, b)).or_insert(0) += 1;
        }
    }
    for (&(a, b), &count) in &edges {
        assert_eq!(count, 1);
        assert_eq!(edges.get(&(b, a)), Some(&1));
    }
}

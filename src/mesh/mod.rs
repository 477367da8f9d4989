pub mod extrusion;
pub mod facet;
pub mod stl;
pub mod triangulation;
pub mod validation;

pub use extrusion::{extrude, extrude_section};
pub use facet::{Facet, Point3D, Triangle, assemble, facet_for};
pub use stl::{StlFormat, write_stl};
pub use triangulation::{Triangulation, triangulate};
pub use validation::{ValidationReport, remove_degenerate, validate_facets};

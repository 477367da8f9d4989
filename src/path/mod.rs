pub mod model;
pub mod parser;

pub use model::{Bounds, Path, Point2D, Section};
pub use parser::{ParseError, parse};

//! svg2stl - Extrude straight-line SVG path outlines into STL solids

pub mod config;
pub mod mesh;
pub mod path;
pub mod svg;

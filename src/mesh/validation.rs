//! Degenerate geometry reporting
//!
//! Zero-area triangles are not errors: they keep a zero normal and are
//! counted here so the caller can decide what to do with them.

use super::Facet;

/// Result of scanning a facet list
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Total number of facets scanned
    pub total: usize,
    /// Facets with a zero normal (zero-area triangles)
    pub degenerate: usize,
    /// Facets with NaN/Inf coordinates
    pub invalid_coords: usize,
    /// Warning messages for issues found
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Check if the mesh can be written without producing garbage numbers
    pub fn is_valid(&self) -> bool {
        self.invalid_coords == 0
    }

    pub fn has_issues(&self) -> bool {
        self.degenerate > 0 || self.invalid_coords > 0
    }

    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Mesh valid: {} facets, no issues", self.total)
        } else {
            format!(
                "Mesh issues: {} total, {} degenerate, {} invalid coords",
                self.total, self.degenerate, self.invalid_coords
            )
        }
    }
}

/// Scan facets for degenerate and non-finite geometry
pub fn validate_facets(facets: &[Facet]) -> ValidationReport {
    let mut report = ValidationReport {
        total: facets.len(),
        ..Default::default()
    };

    for (i, facet) in facets.iter().enumerate() {
        if has_invalid_coords(facet) {
            report.invalid_coords += 1;
            report
                .warnings
                .push(format!("Facet {} has NaN/Inf coordinates", i));
            continue;
        }

        if facet.is_degenerate() {
            report.degenerate += 1;
        }
    }

    if report.degenerate > 0 {
        report.warnings.push(format!(
            "{} degenerate facets with zero normals",
            report.degenerate
        ));
    }

    report
}

fn has_invalid_coords(facet: &Facet) -> bool {
    facet
        .vertices
        .iter()
        .flat_map(|v| v.to_array())
        .chain(facet.normal)
        .any(|c| !c.is_finite())
}

/// Drop degenerate and non-finite facets, keeping order
pub fn remove_degenerate(facets: Vec<Facet>) -> Vec<Facet> {
    facets
        .into_iter()
        .filter(|f| !has_invalid_coords(f) && !f.is_degenerate())
        .collect()
}

// src/structure/mod.rs

//! Immutable atomic structures handed to the quench builders.
//!
//! A [`Structure`] is a periodic cell (3x3 lattice, rows are lattice vectors
//! in Angstrom) plus an ordered list of sites in fractional coordinates. The
//! builders never modify it; every task of a chain shares the same
//! `Arc<Structure>`.

pub mod composition;
pub mod element;

use serde::{Deserialize, Serialize};

use crate::errors::{QuenchflowError, Result};

pub use composition::Composition;

pub type Lattice = [[f64; 3]; 3];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub species: String,
    /// Fractional coordinates.
    pub coords: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    /// Build a structure, rejecting unknown element symbols.
    pub fn new(lattice: Lattice, sites: Vec<Site>) -> Result<Self> {
        if let Some(site) = sites.iter().find(|s| !element::is_known(&s.species)) {
            return Err(QuenchflowError::UnknownElement(site.species.clone()));
        }
        Ok(Self { lattice, sites })
    }

    /// Convenience constructor from parallel species / coordinate lists.
    pub fn from_species(lattice: Lattice, species: &[&str], coords: &[[f64; 3]]) -> Result<Self> {
        if species.len() != coords.len() {
            return Err(QuenchflowError::ConfigError(format!(
                "{} species but {} coordinates",
                species.len(),
                coords.len()
            )));
        }
        let sites = species
            .iter()
            .zip(coords)
            .map(|(s, c)| Site {
                species: s.to_string(),
                coords: *c,
            })
            .collect();
        Structure::new(lattice, sites)
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Cell volume in cubic Angstrom.
    pub fn volume(&self) -> f64 {
        let [a, b, c] = self.lattice;
        let cross = [
            b[1] * c[2] - b[2] * c[1],
            b[2] * c[0] - b[0] * c[2],
            b[0] * c[1] - b[1] * c[0],
        ];
        (a[0] * cross[0] + a[1] * cross[1] + a[2] * cross[2]).abs()
    }

    pub fn composition(&self) -> Composition {
        let mut comp = Composition::new();
        for site in &self.sites {
            comp.add_known(&site.species, 1.0);
        }
        comp
    }

    pub fn reduced_formula(&self) -> String {
        self.composition().reduced_formula()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(a: f64) -> Lattice {
        [[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]
    }

    #[test]
    fn composition_counts_sites() {
        let s = Structure::from_species(
            cubic(4.2),
            &["Mg", "O", "Mg", "O"],
            &[[0.0; 3], [0.5, 0.0, 0.0], [0.5, 0.5, 0.0], [0.0, 0.5, 0.0]],
        )
        .unwrap();
        assert_eq!(s.num_sites(), 4);
        assert_eq!(s.reduced_formula(), "MgO");
        assert!((s.volume() - 4.2f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn composition_matches_checked_species_count() {
        let species = ["Si", "O", "O"];
        let s = Structure::from_species(
            cubic(5.0),
            &species,
            &[[0.0; 3], [0.25, 0.25, 0.25], [0.75, 0.75, 0.75]],
        )
        .unwrap();
        assert_eq!(s.composition(), Composition::from_species(species).unwrap());
        assert_eq!(s.composition().amount("O"), 2.0);
    }

    #[test]
    fn unknown_species_are_rejected() {
        let err = Structure::from_species(cubic(3.0), &["Qq"], &[[0.0; 3]]).unwrap_err();
        assert!(matches!(err, QuenchflowError::UnknownElement(s) if s == "Qq"));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Structure::from_species(cubic(3.0), &["Li", "O"], &[[0.0; 3]]).unwrap_err();
        assert!(matches!(err, QuenchflowError::ConfigError(_)));
    }
}

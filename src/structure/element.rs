// src/structure/element.rs

//! Element symbols and Pauling electronegativities.
//!
//! Noble gases without a tabulated value carry `None` and sort after every
//! element that has one when formulas are written.

/// `(symbol, Pauling electronegativity)` ordered by atomic number.
const ELEMENTS: &[(&str, Option<f64>)] = &[
    ("H", Some(2.20)),
    ("He", None),
    ("Li", Some(0.98)),
    ("Be", Some(1.57)),
    ("B", Some(2.04)),
    ("C", Some(2.55)),
    ("N", Some(3.04)),
    ("O", Some(3.44)),
    ("F", Some(3.98)),
    ("Ne", None),
    ("Na", Some(0.93)),
    ("Mg", Some(1.31)),
    ("Al", Some(1.61)),
    ("Si", Some(1.90)),
    ("P", Some(2.19)),
    ("S", Some(2.58)),
    ("Cl", Some(3.16)),
    ("Ar", None),
    ("K", Some(0.82)),
    ("Ca", Some(1.00)),
    ("Sc", Some(1.36)),
    ("Ti", Some(1.54)),
    ("V", Some(1.63)),
    ("Cr", Some(1.66)),
    ("Mn", Some(1.55)),
    ("Fe", Some(1.83)),
    ("Co", Some(1.88)),
    ("Ni", Some(1.91)),
    ("Cu", Some(1.90)),
    ("Zn", Some(1.65)),
    ("Ga", Some(1.81)),
    ("Ge", Some(2.01)),
    ("As", Some(2.18)),
    ("Se", Some(2.55)),
    ("Br", Some(2.96)),
    ("Kr", Some(3.00)),
    ("Rb", Some(0.82)),
    ("Sr", Some(0.95)),
    ("Y", Some(1.22)),
    ("Zr", Some(1.33)),
    ("Nb", Some(1.60)),
    ("Mo", Some(2.16)),
    ("Tc", Some(1.90)),
    ("Ru", Some(2.20)),
    ("Rh", Some(2.28)),
    ("Pd", Some(2.20)),
    ("Ag", Some(1.93)),
    ("Cd", Some(1.69)),
    ("In", Some(1.78)),
    ("Sn", Some(1.96)),
    ("Sb", Some(2.05)),
    ("Te", Some(2.10)),
    ("I", Some(2.66)),
    ("Xe", Some(2.60)),
    ("Cs", Some(0.79)),
    ("Ba", Some(0.89)),
    ("La", Some(1.10)),
    ("Ce", Some(1.12)),
    ("Pr", Some(1.13)),
    ("Nd", Some(1.14)),
    ("Pm", Some(1.13)),
    ("Sm", Some(1.17)),
    ("Eu", Some(1.20)),
    ("Gd", Some(1.20)),
    ("Tb", Some(1.10)),
    ("Dy", Some(1.22)),
    ("Ho", Some(1.23)),
    ("Er", Some(1.24)),
    ("Tm", Some(1.25)),
    ("Yb", Some(1.10)),
    ("Lu", Some(1.27)),
    ("Hf", Some(1.30)),
    ("Ta", Some(1.50)),
    ("W", Some(2.36)),
    ("Re", Some(1.90)),
    ("Os", Some(2.20)),
    ("Ir", Some(2.20)),
    ("Pt", Some(2.28)),
    ("Au", Some(2.54)),
    ("Hg", Some(2.00)),
    ("Tl", Some(1.62)),
    ("Pb", Some(2.33)),
    ("Bi", Some(2.02)),
    ("Po", Some(2.00)),
    ("At", Some(2.20)),
    ("Rn", None),
    ("Fr", Some(0.70)),
    ("Ra", Some(0.90)),
    ("Ac", Some(1.10)),
    ("Th", Some(1.30)),
    ("Pa", Some(1.50)),
    ("U", Some(1.38)),
    ("Np", Some(1.36)),
    ("Pu", Some(1.28)),
    ("Am", Some(1.30)),
    ("Cm", Some(1.28)),
    ("Bk", Some(1.30)),
    ("Cf", Some(1.30)),
    ("Es", Some(1.30)),
    ("Fm", Some(1.30)),
    ("Md", Some(1.30)),
    ("No", Some(1.30)),
    ("Lr", Some(1.30)),
];

fn lookup(symbol: &str) -> Option<(usize, Option<f64>)> {
    ELEMENTS
        .iter()
        .position(|(s, _)| *s == symbol)
        .map(|idx| (idx, ELEMENTS[idx].1))
}

pub fn is_known(symbol: &str) -> bool {
    lookup(symbol).is_some()
}

pub fn atomic_number(symbol: &str) -> Option<u32> {
    lookup(symbol).map(|(idx, _)| idx as u32 + 1)
}

pub fn electronegativity(symbol: &str) -> Option<f64> {
    lookup(symbol).and_then(|(_, x)| x)
}

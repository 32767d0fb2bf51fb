// src/structure/composition.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{QuenchflowError, Result};
use crate::structure::element;

const AMOUNT_TOLERANCE: f64 = 1e-8;

/// Reduced formulas written as their molecular unit: diatomic elements and
/// alkali / hydrogen peroxides.
const SPECIAL_FORMULAS: &[(&str, &str)] = &[
    ("LiO", "Li2O2"),
    ("NaO", "Na2O2"),
    ("KO", "K2O2"),
    ("HO", "H2O2"),
    ("CsO", "Cs2O2"),
    ("RbO", "Rb2O2"),
    ("O", "O2"),
    ("N", "N2"),
    ("F", "F2"),
    ("Cl", "Cl2"),
    ("H", "H2"),
];

/// Innermost parenthesised group with an optional multiplier, e.g. `(OH)2`.
static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([^()]*)\)(\d*\.?\d*)").expect("group regex is valid")
});

/// One element token with an optional amount, e.g. `Fe2`, `O`, `H0.5`.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]?)(\d*\.?\d*)").expect("token regex is valid")
});

/// Element amounts of a structure or formula.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composition {
    amounts: BTreeMap<String, f64>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one atom per entry in `species`.
    pub fn from_species<'a, I>(species: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut comp = Composition::new();
        for symbol in species {
            comp.add(symbol, 1.0)?;
        }
        Ok(comp)
    }

    /// Parse a chemical formula such as `Fe2O3` or `Ca(OH)2`.
    pub fn from_formula(formula: &str) -> Result<Self> {
        let flat = expand_groups(formula.trim())?;
        let mut comp = Composition::new();
        for (symbol, amount) in parse_flat(&flat, formula)? {
            comp.add(&symbol, amount)?;
        }
        Ok(comp)
    }

    pub fn add(&mut self, symbol: &str, amount: f64) -> Result<()> {
        if !element::is_known(symbol) {
            return Err(QuenchflowError::UnknownElement(symbol.to_string()));
        }
        self.add_known(symbol, amount);
        Ok(())
    }

    /// [`add`](Self::add) for a symbol already checked against the element table.
    pub(crate) fn add_known(&mut self, symbol: &str, amount: f64) {
        *self.amounts.entry(symbol.to_string()).or_insert(0.0) += amount;
    }

    pub fn amount(&self, symbol: &str) -> f64 {
        self.amounts.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn num_atoms(&self) -> f64 {
        self.amounts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_entries().is_empty()
    }

    /// Element symbols in formula order.
    pub fn elements(&self) -> Vec<&str> {
        self.sorted_entries().into_iter().map(|(s, _)| s).collect()
    }

    /// Formula with the raw amounts, e.g. `Fe4O6`.
    pub fn formula(&self) -> String {
        self.write_formula(1.0)
    }

    /// Formula with integer amounts divided by their greatest common divisor,
    /// e.g. `Fe4O6 -> Fe2O3`. Non-integer amounts are written unreduced.
    /// Elemental gases and peroxides keep their molecular unit (`O2`, `Li2O2`).
    pub fn reduced_formula(&self) -> String {
        let reduced = self.write_formula(self.reduction_factor());
        match SPECIAL_FORMULAS.iter().find(|(plain, _)| *plain == reduced) {
            Some((_, molecular)) => molecular.to_string(),
            None => reduced,
        }
    }

    fn reduction_factor(&self) -> f64 {
        let entries = self.sorted_entries();
        let integers: Option<Vec<u64>> = entries
            .iter()
            .map(|(_, amt)| {
                let rounded = amt.round();
                ((amt - rounded).abs() < AMOUNT_TOLERANCE && rounded >= 1.0)
                    .then_some(rounded as u64)
            })
            .collect();

        match integers {
            Some(values) if !values.is_empty() => values.into_iter().fold(0, gcd) as f64,
            _ => 1.0,
        }
    }

    fn write_formula(&self, factor: f64) -> String {
        self.sorted_entries()
            .into_iter()
            .map(|(symbol, amt)| format!("{symbol}{}", format_amount(amt / factor)))
            .collect()
    }

    /// Entries with a positive amount, ordered by electronegativity (elements
    /// without a value last), then by symbol.
    fn sorted_entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .amounts
            .iter()
            .filter(|(_, amt)| **amt > AMOUNT_TOLERANCE)
            .map(|(s, amt)| (s.as_str(), *amt))
            .collect();

        entries.sort_by(|(a, _), (b, _)| {
            let xa = element::electronegativity(a).unwrap_or(f64::INFINITY);
            let xb = element::electronegativity(b).unwrap_or(f64::INFINITY);
            xa.total_cmp(&xb).then_with(|| a.cmp(b))
        });
        entries
    }
}

impl FromStr for Composition {
    type Err = QuenchflowError;

    fn from_str(s: &str) -> Result<Self> {
        Composition::from_formula(s)
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    if (amount - 1.0).abs() < AMOUNT_TOLERANCE {
        String::new()
    } else if (amount - rounded).abs() < AMOUNT_TOLERANCE {
        format!("{}", rounded as u64)
    } else {
        format!("{amount}")
    }
}

fn parse_amount(raw: &str, formula: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(1.0);
    }
    raw.parse::<f64>()
        .map_err(|_| QuenchflowError::InvalidFormula(format!("bad amount '{raw}' in '{formula}'")))
}

/// Rewrite every parenthesised group into a flat token list, innermost first.
fn expand_groups(formula: &str) -> Result<String> {
    let mut current = formula.to_string();

    while let Some(caps) = GROUP_RE.captures(&current) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let inner = caps.get(1).map_or("", |m| m.as_str());
        let factor = parse_amount(caps.get(2).map_or("", |m| m.as_str()), formula)?;

        let expanded: String = parse_flat(inner, formula)?
            .into_iter()
            .map(|(symbol, amt)| format!("{symbol}{}", amt * factor))
            .collect();

        current.replace_range(whole, &expanded);
    }

    if current.contains(['(', ')']) {
        return Err(QuenchflowError::InvalidFormula(format!(
            "unbalanced parentheses in '{formula}'"
        )));
    }
    Ok(current)
}

fn parse_flat(flat: &str, formula: &str) -> Result<Vec<(String, f64)>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in TOKEN_RE.captures_iter(flat) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() != cursor {
            return Err(QuenchflowError::InvalidFormula(format!(
                "unexpected '{}' in '{formula}'",
                &flat[cursor..whole.start()]
            )));
        }
        cursor = whole.end();

        let symbol = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let amount = parse_amount(caps.get(2).map_or("", |m| m.as_str()), formula)?;
        tokens.push((symbol, amount));
    }

    if cursor != flat.len() {
        return Err(QuenchflowError::InvalidFormula(format!(
            "unexpected '{}' in '{formula}'",
            &flat[cursor..]
        )));
    }
    Ok(tokens)
}

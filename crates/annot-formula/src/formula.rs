//! Canonical (Hill order) formula representation.

use std::collections::BTreeMap;
use std::fmt;

/// A parsed formula: element counts plus net charge.
///
/// Rendering via [`fmt::Display`] yields the canonical string: Hill order
/// (carbon, hydrogen, then the rest alphabetically; strictly alphabetical when
/// there is no carbon), counts of one omitted, and a bracketed charge suffix
/// only for charged species (`[C2H4O2]+`, `[Fe]3+`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalFormula {
    counts: BTreeMap<&'static str, u64>,
    charge: i64,
}

impl CanonicalFormula {
    pub(crate) fn new(counts: BTreeMap<&'static str, u64>, charge: i64) -> Self {
        Self { counts, charge }
    }

    /// Net charge (0 for neutral species).
    pub fn charge(&self) -> i64 {
        self.charge
    }

    pub fn is_charged(&self) -> bool {
        self.charge != 0
    }

    /// Count of atoms for an element symbol (0 when absent).
    pub fn count(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Elements with their counts, in Hill order.
    pub fn elements(&self) -> Vec<(&'static str, u64)> {
        let mut ordered = Vec::with_capacity(self.counts.len());
        if let Some(&carbon) = self.counts.get("C") {
            ordered.push(("C", carbon));
            if let Some(&hydrogen) = self.counts.get("H") {
                ordered.push(("H", hydrogen));
            }
            ordered.extend(
                self.counts
                    .iter()
                    .filter(|(symbol, _)| !matches!(**symbol, "C" | "H"))
                    .map(|(symbol, count)| (*symbol, *count)),
            );
        } else {
            ordered.extend(self.counts.iter().map(|(symbol, count)| (*symbol, *count)));
        }
        ordered
    }

    /// The same elements without charge.
    pub fn neutral(&self) -> Self {
        Self {
            counts: self.counts.clone(),
            charge: 0,
        }
    }

    /// Hill-order formula without the charge annotation.
    pub fn hill_formula(&self) -> String {
        let mut out = String::new();
        for (symbol, count) in self.elements() {
            out.push_str(symbol);
            if count > 1 {
                out.push_str(&count.to_string());
            }
        }
        out
    }
}

impl fmt::Display for CanonicalFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.hill_formula();
        if self.charge == 0 {
            return f.write_str(&body);
        }
        let sign = if self.charge > 0 { '+' } else { '-' };
        let magnitude = self.charge.unsigned_abs();
        if magnitude == 1 {
            write!(f, "[{body}]{sign}")
        } else {
            write!(f, "[{body}]{magnitude}{sign}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(pairs: &[(&'static str, u64)], charge: i64) -> CanonicalFormula {
        CanonicalFormula::new(pairs.iter().copied().collect(), charge)
    }

    #[test]
    fn hill_order_with_carbon() {
        let f = formula(&[("O", 2), ("N", 1), ("H", 5), ("C", 2)], 0);
        assert_eq!(f.to_string(), "C2H5NO2");
    }

    #[test]
    fn alphabetical_without_carbon() {
        let f = formula(&[("O", 1), ("H", 2)], 0);
        assert_eq!(f.to_string(), "H2O");
        let f = formula(&[("S", 1), ("O", 4), ("H", 2)], 0);
        assert_eq!(f.to_string(), "H2O4S");
    }

    #[test]
    fn charge_rendering() {
        assert_eq!(formula(&[("Fe", 1)], 3).to_string(), "[Fe]3+");
        assert_eq!(formula(&[("Cl", 1)], -1).to_string(), "[Cl]-");
        assert_eq!(formula(&[("C", 1), ("O", 3)], -2).to_string(), "[CO3]2-");
    }

    #[test]
    fn neutral_drops_charge() {
        let f = formula(&[("C", 1), ("H", 5)], 1);
        assert!(f.is_charged());
        assert_eq!(f.neutral().to_string(), "CH5");
        assert_eq!(f.count("H"), 5);
        assert_eq!(f.count("N"), 0);
    }
}

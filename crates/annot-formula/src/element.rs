//! Element symbol table.

/// Recognized element symbols: the periodic table plus the hydrogen isotopes
/// deuterium (`D`) and tritium (`T`).
pub const ELEMENTS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og", "D", "T",
];

/// Returns the interned symbol if `symbol` is a recognized element.
pub fn element_symbol(symbol: &str) -> Option<&'static str> {
    ELEMENTS.iter().copied().find(|candidate| *candidate == symbol)
}

/// Returns true if `symbol` is a recognized element (case-sensitive).
pub fn is_element(symbol: &str) -> bool {
    element_symbol(symbol).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_case_sensitive() {
        assert!(is_element("Co"));
        assert!(!is_element("CO"));
        assert!(!is_element("co"));
        assert!(!is_element("Xx"));
    }

    #[test]
    fn table_has_no_duplicates() {
        let mut symbols: Vec<&str> = ELEMENTS.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), ELEMENTS.len());
    }
}

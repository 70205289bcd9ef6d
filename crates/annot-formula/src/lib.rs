//! Chemical formula harmonization.
//!
//! Parses molecular formula strings such as `O2H4C2+` or `(CH3)2CO` into an
//! element multiset plus charge, and renders them in Hill order:
//!
//! ```
//! use annot_formula::harmonize;
//!
//! assert_eq!(harmonize("O2H4C2").unwrap().to_string(), "C2H4O2");
//! assert_eq!(harmonize("O2H4C2+").unwrap().to_string(), "[C2H4O2]+");
//! assert!(harmonize("Xx2").is_err());
//! ```

mod element;
mod error;
mod formula;
mod parser;

pub use element::{ELEMENTS, element_symbol, is_element};
pub use error::{FormulaError, ParseIssue, Result};
pub use formula::CanonicalFormula;
pub use parser::{harmonize, is_valid_formula};

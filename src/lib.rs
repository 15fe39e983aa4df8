//! Element counting for condensed chemical formulas.
//!
//! A formula such as `Cu(OH)2` is cut into top-level units, each unit is
//! evaluated into `(element, count)` contributions (groups recursively, scaled
//! by their multiplier digit), and the contributions are summed into an
//! [`ElementTally`] that keeps first-occurrence order.
//!
//! ```
//! let tally = chem_formula::aggregate("C2H5OH").unwrap();
//! assert_eq!(tally.get("H"), Some(6));
//! assert_eq!(tally.to_string(), "C:2,H:6,O:1");
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod parser;
pub mod tally;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use error::{MalformedFormulaError, Result};
pub use parser::{
    aggregate, aggregate_with, evaluate, evaluate_with, next_unit, parse, parse_with,
    Contribution, Unit, UnitKind,
};
pub use tally::{format, ElementTally};

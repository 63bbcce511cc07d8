pub mod bracket;
pub mod builtin;
pub mod rate_table;
pub mod registry;

pub use bracket::{BracketTable, TaxBracket};
pub use rate_table::*;
pub use registry::RateRegistry;

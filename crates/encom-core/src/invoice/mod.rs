//! Invoice line-item extraction module.

mod assemble;
mod parser;
pub mod normalize;
pub mod rules;

pub use assemble::{assemble, collapse_doubled_family};
pub use normalize::tokenize;
pub use parser::{Candidate, InvoiceParser, QuantitySide, RawFields};

pub mod parser;
pub mod predicate;


pub use parser::compile;
pub use predicate::{Assertion, ProbeResponse};

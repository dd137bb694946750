pub mod checks;


pub use checks::{Healthcheck, Outcome};

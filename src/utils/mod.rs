pub mod errors;

pub use errors::{CardError, CardResult};

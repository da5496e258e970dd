pub mod calculations;
pub mod models;

pub use calculations::{InvalidInputError, SupplementalRates, TaxEngine};
pub use models::*;

pub mod domain;
mod services;

pub use domain::{CommandResponse, Outcome, NO_INDEX_MESSAGE};
pub use services::{add_convention, explain, index, status};

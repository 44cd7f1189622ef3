//! Pet observations and their table

mod record;
mod repository;

pub use record::{iso_timestamp, NewPet, CREATED_AT, UNKNOWN};
pub use repository::Pets;

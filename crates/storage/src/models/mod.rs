pub mod address;
pub mod normalized_name;
pub mod person;
pub mod person_sport;
pub mod sport;

pub use address::Address;
pub use normalized_name::NormalizedName;
pub use person::{Person, PersonKind, Role};
pub use person_sport::PersonSport;
pub use sport::Sport;

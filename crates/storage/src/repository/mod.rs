pub mod factory;
pub mod person;
pub mod sport;

pub use factory::PersonRepositoryFactory;
pub use person::PersonRepository;
pub use sport::SportRepository;

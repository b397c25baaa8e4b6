pub mod authorization;
pub mod error;
pub mod query;
pub mod repository;
pub mod todo;
pub mod user;
pub mod validation;

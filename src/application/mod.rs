pub mod auth_service;
pub mod todo_service;
pub mod user_service;

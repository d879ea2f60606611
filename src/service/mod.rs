pub mod error;
pub mod reminder_service;
pub mod verification_service;

pub mod code_generator;
pub mod currency;
pub mod phone;

pub mod templates;
pub mod whatsapp;

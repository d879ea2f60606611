pub mod reminders;
pub mod verification;

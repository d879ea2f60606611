pub mod db;
pub mod notificationdb;
pub mod settingsdb;
pub mod subscriptiondb;
pub mod verificationdb;

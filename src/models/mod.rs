pub mod notificationmodels;
pub mod settingsmodel;
pub mod subscriptionmodels;
pub mod verificationmodels;

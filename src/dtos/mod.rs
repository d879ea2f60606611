pub mod reminderdtos;
pub mod verificationdtos;

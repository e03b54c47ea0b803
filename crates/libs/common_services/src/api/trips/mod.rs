pub mod budget;
pub mod error;
pub mod interfaces;
pub mod join_code;
pub mod service;

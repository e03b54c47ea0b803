pub mod interfaces;
pub mod service;

pub mod error;
pub mod pdf;
pub mod report;
pub mod service;

//! Route modules for the PDF form-fill service

pub mod fill;
pub mod health;

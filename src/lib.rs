pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod otp;
pub mod transfer;
pub mod vault;

pub mod balance;
pub mod config;
pub mod member;
pub mod payment;

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;
pub mod survey;

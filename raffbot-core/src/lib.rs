// src/lib.rs

pub mod currency;
pub mod services;
pub mod tasks;
pub mod utils;

pub use raffbot_common::error::Error;

// src/lib.rs

//! JupiterWeb Catalog Crawler Library

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

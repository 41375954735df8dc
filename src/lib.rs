// src/lib.rs

//! feedsplit: splits an aggregated newsletter feed into per-show RSS feeds.

pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

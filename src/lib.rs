#![allow(async_fn_in_trait)]

pub mod web_ui;
pub mod cli;
pub mod utils;
pub mod client;
pub mod entities;
pub mod config;
pub mod storage;
pub mod error;
pub mod logging;
pub mod catalog;
pub mod filter;
pub mod options;
pub mod report;
pub mod sorting;
pub mod stats;

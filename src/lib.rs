// src/lib.rs
pub mod config;
pub mod models;
pub mod poller;
pub mod query;
pub mod report;
pub mod storage;

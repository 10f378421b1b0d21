pub mod calculators;
pub mod catalog;
pub mod config;
mod config_env;
pub mod llm;
pub mod models;
pub mod pages;
pub mod session;

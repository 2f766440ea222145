//! i18n-store library
//!
//! Stores `(key, locale)` translations with free-form tags, answers filtered
//! searches and serves cached per-locale exports over HTTP.

pub mod cache;
pub mod config;
pub mod database;
pub mod entities;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod web;

pub use errors::{AppError, AppResult};

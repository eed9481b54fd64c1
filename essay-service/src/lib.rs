//! Essay feedback service.
//!
//! Accepts an essay over HTTP, renders it into a fixed examiner prompt, asks a
//! generative-language API for feedback and relays the text back as JSON.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

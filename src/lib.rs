//! Digitales Skript Server Library
//!
//! This crate exposes the pure application modules for integration
//! tests and library consumers. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `colors`: highlight color registry
//! - `export`: annotation export pipeline (formatter + file delivery)
//! - `ai`: flashcard generation (provider trait + service)
//! - `backend`: hosted backend client
//! - `ui`: controlled view values for the reader's buttons

pub mod ai;
pub mod backend;
pub mod colors;
pub mod config;
pub mod export;
pub mod ui;

//! Route modules for the Digitales Skript server

pub mod export;
pub mod flashcards;
pub mod health;

//! Core library: shared state store, selection intake, training simulation, chat.

pub mod app;
pub mod chat;
pub mod clock;
pub mod config;
pub mod models;
pub mod rules;
pub mod selection;
pub mod store;
pub mod trainer;

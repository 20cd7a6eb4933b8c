// src/application/queries/mod.rs
pub mod categories;
pub mod entries;
pub mod manager;
pub mod widgets;

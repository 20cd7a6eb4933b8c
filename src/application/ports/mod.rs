// src/application/ports/mod.rs
pub mod security;
pub mod tags;
pub mod time;
pub mod util;


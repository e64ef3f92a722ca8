//! SeaORM entities and connection helpers for the user registry.

pub mod db;
pub mod user;

#[cfg(test)]
mod tests;

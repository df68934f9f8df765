//! HTTP handlers

pub mod health;
pub mod exercises;
pub mod session;
pub mod frames;

#[cfg(test)]
mod tests;

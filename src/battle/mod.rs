pub mod ai;
pub mod calculators;
pub mod catch;
pub mod commands;
pub mod engine;
pub mod flee;
pub mod runner;
pub mod state;

#[cfg(test)]
mod tests;

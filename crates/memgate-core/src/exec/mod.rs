pub mod preflight;
pub mod runner;
pub mod target;

pub mod clock;
pub mod config;
pub mod engine;
pub mod stats;
pub mod variates;

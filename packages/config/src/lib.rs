// ABOUTME: Configuration constants shared by the server binary and tests
// ABOUTME: Re-exports the environment variable names

pub mod constants;

pub use constants::*;

// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Tracker

// Port Configuration
pub const TRACKER_API_PORT: &str = "TRACKER_API_PORT";
pub const PORT: &str = "PORT"; // Legacy
pub const TRACKER_API_HOST: &str = "TRACKER_API_HOST";

// CORS Configuration
pub const TRACKER_CORS_ORIGIN: &str = "TRACKER_CORS_ORIGIN";
pub const CORS_ORIGIN: &str = "CORS_ORIGIN"; // Legacy

// Database Configuration
pub const TRACKER_DATABASE_PATH: &str = "TRACKER_DATABASE_PATH";
pub const TRACKER_DB_MAX_CONNECTIONS: &str = "TRACKER_DB_MAX_CONNECTIONS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_API_PORT: u16 = 4001;
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

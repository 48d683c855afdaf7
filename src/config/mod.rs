mod server;

pub use server::{DEFAULT_CORS_ORIGIN, ServerConfig};

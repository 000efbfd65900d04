mod profile;
mod ssl_mode;

pub use profile::{ConnectionProfile, DEFAULT_PORT};
pub use ssl_mode::SslMode;

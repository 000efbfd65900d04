pub mod adapters;
pub mod logging;

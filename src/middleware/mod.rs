pub mod cors;
pub mod latency;

pub use cors::cors;
pub use latency::log_latency;

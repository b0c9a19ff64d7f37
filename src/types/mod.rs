pub mod chat;
pub mod clinic;
pub mod json;

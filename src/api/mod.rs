pub mod sakhi_backend;

pub use sakhi_backend::SakhiBackendApi;

//! Resource client implementations

pub mod http;
pub mod in_memory;

pub use http::HttpResourceClient;
pub use in_memory::InMemoryResourceClient;

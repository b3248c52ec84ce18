pub mod agents;
pub mod client;
pub mod response;

pub use client::{HttpClient, Prober};
pub use response::ProbeResponse;

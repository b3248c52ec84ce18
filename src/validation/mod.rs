pub mod baseline;
pub mod diff;
pub mod token;

pub use baseline::{Baseline, BaselineSampler, ConnectionStability, LatencyProfile};

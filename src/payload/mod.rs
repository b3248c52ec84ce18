pub mod loader;

pub use loader::{load_payloads, load_targets, PayloadSet};

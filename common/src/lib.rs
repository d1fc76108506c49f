pub mod caps;
pub mod singleton;
pub mod types;

pub mod error;

mod cognito;
mod core;
mod faults;
mod logs;

pub use core::Backend;
pub use faults::Operation;

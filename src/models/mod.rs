pub mod common;
pub mod prize;
pub mod spin;

pub use common::*;
pub use prize::*;
pub use spin::*;

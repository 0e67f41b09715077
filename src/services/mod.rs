pub mod prize_pool;
pub mod prize_service;
pub mod spin_engine;
pub mod spin_service;

pub use prize_pool::*;
pub use prize_service::*;
pub use spin_engine::*;
pub use spin_service::*;

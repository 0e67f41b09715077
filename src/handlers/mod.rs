pub mod prizes;
pub mod spin;

pub use prizes::prize_config;
pub use spin::spin_config;

pub mod prize_store;

#[cfg(test)]
pub mod memory;

pub use prize_store::{PrizeStore, SeaOrmPrizeStore};

pub mod analysis;
pub mod data;
pub mod error;
pub mod export;
pub mod extract;
pub mod markup;
pub mod page;
pub mod rip;
pub mod bridge;

#[cfg(feature = "python")]
pub use bridge::pymodule::tcg_card_rip;

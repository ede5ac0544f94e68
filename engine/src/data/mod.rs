pub mod card;
pub mod collection;
pub mod loader;

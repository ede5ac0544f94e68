//! Card extraction: symbol and clause tables, the row classifier, the
//! markup normalizer and one extractor per card kind.

pub mod classify;
pub mod clauses;
pub mod config;
pub mod creature;
pub mod energy;
pub mod normalize;
pub mod symbols;
pub mod trainer;

pub use classify::{ClassificationWarning, RowClassifier, RowKind};
pub use clauses::{Clause, ClauseAction, ClausePattern, ClauseTable};
pub use config::ExtractConfig;
pub use creature::{extract_ability, extract_attack, extract_creature};
pub use energy::extract_energy;
pub use normalize::normalize;
pub use symbols::{SymbolKind, SymbolTable};
pub use trainer::extract_trainer;

//! Rule sourcing: adapters over raw project configuration, the built-in
//! default catalog, and the refresh pass that reconciles the store.

mod adapters;
mod catalog;
mod csv_source;
mod seeder;
mod sources;

pub use adapters::{contract_rules, spec_rules};
pub use catalog::{activity, default_rules};
pub use csv_source::CsvConfigSource;
pub use seeder::{RefreshOutcome, RuleSeeder};
pub use sources::{ConfigSource, ContractTerms, SourceError, StaticConfigSource, WeldSpec};

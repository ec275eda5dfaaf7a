//! Mapping, aggregation and balance checking

pub mod accounts;
pub mod balance;
pub mod config;
pub mod context;
pub mod currency;
pub mod hierarchy;
pub mod log;
pub mod mapper;
pub mod transaction;

// Re-export main types for cleaner imports
pub use balance::{BalanceCheck, validate_balance_sheet};
pub use context::{Period, ReportingContext};
pub use currency::CurrencyRateProvider;
pub use hierarchy::{FinancialHierarchy, FinancialNode, FinancialValue, aggregate_node};
pub use mapper::{Mapper, MappingReport};
pub use transaction::{MappedTransaction, RawTransaction, SourceEntity, ValidationStatus};

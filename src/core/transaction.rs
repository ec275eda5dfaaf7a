//! Raw and mapped transaction types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Separator between company and department in a transaction `source`.
pub const SOURCE_SEPARATOR: char = ':';

/// A transaction as delivered by the ingestion side, before any mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub id: String,
    /// `Company` or `Company:Department`
    pub source: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// The organisational unit a transaction originates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceEntity {
    Company { company: String },
    Department { company: String, department: String },
}

impl SourceEntity {
    /// Resolves a `source` string.
    ///
    /// Any separator makes a department. Only the first one is significant:
    /// `"A:B:C"` is department `B:C` of company `A`, and `"HQ:"` is the
    /// department `""` of `HQ`.
    pub fn parse(source: &str) -> Self {
        match source.split_once(SOURCE_SEPARATOR) {
            Some((company, department)) => SourceEntity::Department {
                company: company.to_string(),
                department: department.to_string(),
            },
            None => SourceEntity::Company {
                company: source.to_string(),
            },
        }
    }

    pub fn company(&self) -> &str {
        match self {
            SourceEntity::Company { company } | SourceEntity::Department { company, .. } => {
                company
            }
        }
    }

    pub fn department(&self) -> Option<&str> {
        match self {
            SourceEntity::Company { .. } => None,
            SourceEntity::Department { department, .. } => Some(department),
        }
    }

    pub fn is_company(&self) -> bool {
        matches!(self, SourceEntity::Company { .. })
    }
}

impl std::fmt::Display for SourceEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceEntity::Company { company } => write!(f, "{company}"),
            SourceEntity::Department {
                company,
                department,
            } => write!(f, "{company} / {department}"),
        }
    }
}

/// Amount expressed in both the original and the reporting currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub original: String,
    pub converted: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Ok,
    Error,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationStatus::Ok => write!(f, "ok"),
            ValidationStatus::Error => write!(f, "error"),
        }
    }
}

/// Outcome of the business-rule checks run against a transaction.
///
/// `checks` and `errors` keep the order in which the rules ran. `status` is
/// derived from `errors` and never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub status: ValidationStatus,
    pub checks: Vec<String>,
    pub errors: Vec<String>,
}

impl Validation {
    pub(crate) fn new() -> Self {
        Self {
            status: ValidationStatus::Ok,
            checks: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn pass(&mut self, message: impl Into<String>) {
        self.checks.push(message.into());
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.status = ValidationStatus::Error;
    }

    pub fn is_ok(&self) -> bool {
        self.status == ValidationStatus::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedTransaction {
    pub id: String,
    pub source_entity: SourceEntity,
    pub target_account: String,
    pub currency: CurrencyConversion,
    pub validation: Validation,
}

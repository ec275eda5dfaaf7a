//! Terminal front end: command runners and table rendering

pub mod aggregate;
pub mod balance;
pub mod map;
pub mod setup;
pub mod ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

//! # Budget Grid
//!
//! A library for the budget calculator of an accounting front-end: a dense
//! account × period grid of amounts with totals that are always recomputed
//! from the current cells.
//!
//! ## Core Concepts
//!
//! - **Accounts**: labels selected under five categories (Income, Expense, Asset,
//!   Liability, Equity), shown in that order
//! - **Periods**: labels generated from a reporting cadence over an April to March
//!   fiscal year (12 months, 4 quarters, 2 halves or the whole year)
//! - **Cells**: one amount per (account, period); typed input that is not a number
//!   is stored as zero
//! - **Aggregates**: row, column and category totals, profit/loss
//!   (Income - Expense) and the ALE balance (Asset - Liability - Equity)
//! - **Sections**: each category can be collapsed without touching any number
//!
//! ## Example
//!
//! ```rust
//! use budget_grid::*;
//!
//! let payload = BudgetPayload {
//!     name: "Operating plan".to_string(),
//!     fiscal_year: "2025-26".to_string(),
//!     period: "monthly".to_string(),
//!     income_accounts: vec!["Sales".to_string()],
//!     expense_accounts: vec!["Rent".to_string()],
//!     ..Default::default()
//! };
//!
//! let mut grid = build_grid(&payload);
//! grid.set_cell("Sales", "Apr 2025", "1000");
//! grid.set_cell("Rent", "Apr 2025", "400");
//!
//! let totals = grid.aggregator();
//! assert_eq!(totals.profit_or_loss_for("Apr 2025"), 600.0);
//! assert_eq!(totals.profit_or_loss(), 600.0);
//! ```

pub mod accounts;
pub mod aggregation;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod periods;
pub mod schema;
pub mod visibility;

pub use accounts::{AccountSet, CategoryGroup, DuplicateAccount};
pub use aggregation::{Aggregator, BalanceStatus, Tab};
pub use error::{BudgetGridError, Result};
pub use grid::{BudgetGrid, GridSummary, MetricSummary, PeriodMetric, RowSummary, SectionSummary};
pub use matrix::{parse_amount, ValueMatrix};
pub use periods::{
    generate_period_spans, generate_periods, generate_periods_for, FiscalCalendar, PeriodSpan,
};
pub use schema::{BudgetPayload, Cadence, Category};
pub use visibility::SectionVisibility;

/// Builds the grid for a navigation payload. Missing fields give an empty
/// but usable grid.
pub fn build_grid(payload: &BudgetPayload) -> BudgetGrid {
    BudgetGrid::from_payload(payload)
}

/// Parses a JSON payload and builds its grid.
pub fn build_grid_from_json(json: &str) -> Result<BudgetGrid> {
    let payload = BudgetPayload::from_json(json)?;
    Ok(build_grid(&payload))
}

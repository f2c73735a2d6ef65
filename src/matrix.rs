use crate::error::{BudgetGridError, Result};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

/// Reads user input as an amount. Anything that is not a finite number,
/// including the empty string, reads as zero.
///
/// Surrounding whitespace and `,` / `_` digit group separators are accepted.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            if !cleaned.is_empty() {
                debug!("Cell input '{}' is not a number, storing 0", raw);
            }
            0.0
        }
    }
}

/// Dense account × period grid of amounts.
///
/// The shape is fixed at construction: every account has a cell for every
/// period, and the only way to change either axis is to build a new matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueMatrix {
    accounts: Vec<String>,
    periods: Vec<String>,
    #[serde(skip)]
    account_index: HashMap<String, usize>,
    #[serde(skip)]
    period_index: HashMap<String, usize>,
    /// Row-major, `accounts.len() * periods.len()` cells.
    cells: Vec<f64>,
}

impl ValueMatrix {
    /// Builds a zero-filled matrix. A label repeated on either axis keeps its
    /// first position only.
    pub fn new(accounts: Vec<String>, periods: Vec<String>) -> Self {
        let (accounts, account_index) = unique_labels(accounts, "account");
        let (periods, period_index) = unique_labels(periods, "period");
        let cells = vec![0.0; accounts.len() * periods.len()];

        debug!(
            "Built value matrix with {} accounts and {} periods",
            accounts.len(),
            periods.len()
        );

        Self {
            accounts,
            periods,
            account_index,
            period_index,
            cells,
        }
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn contains(&self, account: &str, period: &str) -> bool {
        self.slot(account, period).is_some()
    }

    /// Stores the amount read from `raw_input`. Unparseable input stores 0.
    pub fn set_cell(&mut self, account: &str, period: &str, raw_input: &str) {
        self.set_value(account, period, parse_amount(raw_input));
    }

    /// Stores an amount. A pair outside the grid is ignored.
    pub fn set_value(&mut self, account: &str, period: &str, value: f64) {
        if let Err(e) = self.try_set_value(account, period, value) {
            warn!("Ignoring cell write: {}", e);
        }
    }

    pub fn try_set_value(&mut self, account: &str, period: &str, value: f64) -> Result<()> {
        let row = *self
            .account_index
            .get(account)
            .ok_or_else(|| BudgetGridError::UnknownAccount(account.to_string()))?;
        let col = *self
            .period_index
            .get(period)
            .ok_or_else(|| BudgetGridError::UnknownPeriod {
                account: account.to_string(),
                period: period.to_string(),
            })?;

        let slot = row * self.periods.len() + col;
        self.cells[slot] = if value.is_finite() { value } else { 0.0 };
        Ok(())
    }

    pub fn get_cell(&self, account: &str, period: &str) -> f64 {
        self.slot(account, period)
            .map(|slot| self.cells[slot])
            .unwrap_or(0.0)
    }

    /// `(period, value)` pairs of one account in period order; empty for an
    /// unknown account.
    pub fn row<'a>(&'a self, account: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let width = self.periods.len();
        let values: &'a [f64] = match self.account_index.get(account) {
            Some(&row) => &self.cells[row * width..(row + 1) * width],
            None => &[],
        };

        self.periods
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0.0);
    }

    fn slot(&self, account: &str, period: &str) -> Option<usize> {
        let row = self.account_index.get(account)?;
        let col = self.period_index.get(period)?;
        Some(row * self.periods.len() + col)
    }
}

fn unique_labels(labels: Vec<String>, axis: &str) -> (Vec<String>, HashMap<String, usize>) {
    let mut index = HashMap::with_capacity(labels.len());
    let mut kept = Vec::with_capacity(labels.len());

    for label in labels {
        if index.contains_key(&label) {
            warn!("Dropping repeated {} '{}' from value matrix", axis, label);
            continue;
        }
        index.insert(label.clone(), kept.len());
        kept.push(label);
    }

    (kept, index)
}

use crate::accounts::AccountSet;
use crate::matrix::ValueMatrix;
use crate::schema::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sign classification of a derived metric, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum BalanceStatus {
    Balanced,
    Surplus,
    Deficit,
}

impl BalanceStatus {
    /// Zero is balanced, positive a surplus, negative a deficit. A value that
    /// is not finite (an overflowed sum) can never count as balanced and is
    /// reported as a deficit.
    pub fn classify(value: f64) -> Self {
        if !value.is_finite() {
            BalanceStatus::Deficit
        } else if value > 0.0 {
            BalanceStatus::Surplus
        } else if value < 0.0 {
            BalanceStatus::Deficit
        } else {
            BalanceStatus::Balanced
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BalanceStatus::Balanced => "blue",
            BalanceStatus::Surplus => "green",
            BalanceStatus::Deficit => "red",
        }
    }
}

/// The two pages of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    IncomeExpense,
    Balance,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::IncomeExpense, Tab::Balance];

    pub fn categories(&self) -> &'static [Category] {
        match self {
            Tab::IncomeExpense => &[Category::Income, Category::Expense],
            Tab::Balance => &[Category::Asset, Category::Liability, Category::Equity],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::IncomeExpense => "Income & Expense",
            Tab::Balance => "Assets, Liabilities & Equity",
        }
    }
}

/// Read-only totals over a matrix. Nothing is cached: every call sums the
/// cells as they are now.
pub struct Aggregator<'a> {
    matrix: &'a ValueMatrix,
    accounts: &'a AccountSet,
}

impl<'a> Aggregator<'a> {
    pub fn new(matrix: &'a ValueMatrix, accounts: &'a AccountSet) -> Self {
        Self { matrix, accounts }
    }

    pub fn row_total(&self, account: &str) -> f64 {
        self.matrix.row(account).map(|(_, value)| value).sum()
    }

    pub fn column_total<S: AsRef<str>>(&self, period: &str, accounts: &[S]) -> f64 {
        accounts
            .iter()
            .map(|account| self.matrix.get_cell(account.as_ref(), period))
            .sum()
    }

    /// Sum of every column total of `accounts`.
    pub fn grand_total<S: AsRef<str>>(&self, accounts: &[S]) -> f64 {
        self.matrix
            .periods()
            .iter()
            .map(|period| self.column_total(period, accounts))
            .sum()
    }

    pub fn tab_column_total(&self, tab: Tab, period: &str) -> f64 {
        self.column_total(period, &self.accounts.accounts_of(tab.categories()))
    }

    pub fn tab_grand_total(&self, tab: Tab) -> f64 {
        self.grand_total(&self.accounts.accounts_of(tab.categories()))
    }

    pub fn category_total(&self, category: Category) -> f64 {
        self.accounts
            .accounts_in(category)
            .iter()
            .map(|account| self.row_total(account))
            .sum()
    }

    pub fn category_period_total(&self, category: Category, period: &str) -> f64 {
        self.column_total(period, self.accounts.accounts_in(category))
    }

    /// Income minus expense over the whole grid.
    pub fn profit_or_loss(&self) -> f64 {
        self.category_total(Category::Income) - self.category_total(Category::Expense)
    }

    pub fn profit_or_loss_for(&self, period: &str) -> f64 {
        self.category_period_total(Category::Income, period)
            - self.category_period_total(Category::Expense, period)
    }

    /// Assets minus liabilities minus equity over the whole grid.
    pub fn ale_balance(&self) -> f64 {
        self.category_total(Category::Asset)
            - self.category_total(Category::Liability)
            - self.category_total(Category::Equity)
    }

    pub fn ale_balance_for(&self, period: &str) -> f64 {
        self.category_period_total(Category::Asset, period)
            - self.category_period_total(Category::Liability, period)
            - self.category_period_total(Category::Equity, period)
    }

    pub fn ale_status(&self) -> BalanceStatus {
        BalanceStatus::classify(self.ale_balance())
    }

    pub fn ale_status_for(&self, period: &str) -> BalanceStatus {
        BalanceStatus::classify(self.ale_balance_for(period))
    }
}

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    #[schemars(description = "Revenue lines shown on the income/expense tab")]
    Income,

    #[schemars(description = "Cost lines shown on the income/expense tab")]
    Expense,

    #[schemars(description = "Resources owned, shown on the balance tab")]
    Asset,

    #[schemars(description = "Obligations owed, shown on the balance tab")]
    Liability,

    #[schemars(description = "Owner's residual interest, shown on the balance tab")]
    Equity,
}

impl Category {
    /// Fixed display order of the category groups.
    pub const ALL: [Category; 5] = [
        Category::Income,
        Category::Expense,
        Category::Asset,
        Category::Liability,
        Category::Equity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
            Category::Asset => "Asset",
            Category::Liability => "Liability",
            Category::Equity => "Equity",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Income => 0,
            Category::Expense => 1,
            Category::Asset => 2,
            Category::Liability => 3,
            Category::Equity => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reporting cadence selected for the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    #[default]
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Cadence {
    /// Reads one of the exact names `monthly`, `quarterly`, `half-yearly` or
    /// `yearly`. Anything else, including the empty string and other
    /// spellings, is treated as monthly.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "monthly" => Cadence::Monthly,
            "quarterly" => Cadence::Quarterly,
            "half-yearly" => Cadence::HalfYearly,
            "yearly" => Cadence::Yearly,
            other => {
                if !other.is_empty() {
                    debug!("Unrecognised cadence '{}', using monthly", other);
                }
                Cadence::Monthly
            }
        }
    }

    pub fn period_count(&self) -> usize {
        match self {
            Cadence::Monthly => 12,
            Cadence::Quarterly => 4,
            Cadence::HalfYearly => 2,
            Cadence::Yearly => 1,
        }
    }

    /// Number of months covered by one period.
    pub fn months_per_period(&self) -> u32 {
        12 / self.period_count() as u32
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cadence::Monthly => "monthly",
            Cadence::Quarterly => "quarterly",
            Cadence::HalfYearly => "half-yearly",
            Cadence::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selection state handed over by the account picking step.
///
/// Every field is optional on the wire: a missing string becomes empty and a
/// missing list becomes an empty list, so a partial payload still yields a
/// valid (possibly empty) grid.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPayload {
    #[serde(default)]
    #[schemars(description = "Display name of the budget")]
    pub name: String,

    #[serde(default)]
    #[schemars(description = "Fiscal year label, e.g. '2025-26'. The leading year is the start of the April to March window.")]
    pub fiscal_year: String,

    #[serde(default)]
    #[schemars(
        description = "Reporting cadence: 'monthly', 'quarterly', 'half-yearly' or 'yearly'. Empty or unknown values mean monthly."
    )]
    pub period: String,

    #[serde(default)]
    pub income_accounts: Vec<String>,

    #[serde(default)]
    pub expense_accounts: Vec<String>,

    #[serde(default)]
    pub asset_accounts: Vec<String>,

    #[serde(default)]
    pub liability_accounts: Vec<String>,

    #[serde(default)]
    pub equity_accounts: Vec<String>,
}

impl BudgetPayload {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn cadence(&self) -> Cadence {
        Cadence::parse(&self.period)
    }

    pub fn accounts_for(&self, category: Category) -> &[String] {
        match category {
            Category::Income => &self.income_accounts,
            Category::Expense => &self.expense_accounts,
            Category::Asset => &self.asset_accounts,
            Category::Liability => &self.liability_accounts,
            Category::Equity => &self.equity_accounts,
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(BudgetPayload)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

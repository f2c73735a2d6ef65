use crate::accounts::{csv_field, AccountSet};
use crate::aggregation::{Aggregator, BalanceStatus, Tab};
use crate::matrix::ValueMatrix;
use crate::periods::{generate_periods_for, FiscalCalendar};
use crate::schema::{BudgetPayload, Cadence, Category};
use crate::visibility::SectionVisibility;
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RowSummary {
    pub account: String,
    pub values: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionSummary {
    pub category: Category,
    pub expanded: bool,
    pub rows: Vec<RowSummary>,
    pub period_totals: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodMetric {
    pub period: String,
    pub value: f64,
    pub status: BalanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricSummary {
    pub per_period: Vec<PeriodMetric>,
    pub total: f64,
    pub status: BalanceStatus,
}

/// Every number the grid displays, computed from the cells at call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GridSummary {
    pub name: String,
    pub fiscal_year: String,
    pub cadence: Cadence,
    pub periods: Vec<String>,
    pub sections: Vec<SectionSummary>,
    /// Column totals over income and expense rows together.
    pub income_expense_totals: Vec<f64>,
    pub income_expense_grand_total: f64,
    pub profit_or_loss: MetricSummary,
    pub ale_balance: MetricSummary,
}

impl GridSummary {
    pub fn section(&self, category: Category) -> Option<&SectionSummary> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One budget view: the selected accounts, the period axis, the cell values
/// and the section state, for as long as the view is open.
#[derive(Debug, Clone)]
pub struct BudgetGrid {
    name: String,
    cadence: Cadence,
    calendar: FiscalCalendar,
    accounts: AccountSet,
    periods: Vec<String>,
    matrix: ValueMatrix,
    visibility: SectionVisibility,
}

impl BudgetGrid {
    pub fn new(
        name: impl Into<String>,
        calendar: FiscalCalendar,
        cadence: Cadence,
        accounts: AccountSet,
    ) -> Self {
        let periods = generate_periods_for(cadence, &calendar);
        let matrix = ValueMatrix::new(accounts.all_accounts(), periods.clone());

        Self {
            name: name.into(),
            cadence,
            calendar,
            accounts,
            periods,
            matrix,
            visibility: SectionVisibility::default(),
        }
    }

    pub fn from_payload(payload: &BudgetPayload) -> Self {
        let calendar = FiscalCalendar::from_fiscal_year_label(&payload.fiscal_year);
        let cadence = payload.cadence();
        let accounts = AccountSet::from_payload(payload);

        info!(
            "Opening budget grid '{}' ({}, {}) with {} accounts",
            payload.name,
            calendar.label(),
            cadence,
            accounts.len()
        );

        Self::new(payload.name.clone(), calendar, cadence, accounts)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fiscal year label in the calendar's `FY 2025-26` form, whatever
    /// spelling the payload used.
    pub fn fiscal_year(&self) -> String {
        self.calendar.label()
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn calendar(&self) -> &FiscalCalendar {
        &self.calendar
    }

    pub fn accounts(&self) -> &AccountSet {
        &self.accounts
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn matrix(&self) -> &ValueMatrix {
        &self.matrix
    }

    pub fn visibility(&self) -> &SectionVisibility {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut SectionVisibility {
        &mut self.visibility
    }

    pub fn set_cell(&mut self, account: &str, period: &str, raw_input: &str) {
        self.matrix.set_cell(account, period, raw_input);
    }

    pub fn set_value(&mut self, account: &str, period: &str, value: f64) {
        self.matrix.set_value(account, period, value);
    }

    pub fn get_cell(&self, account: &str, period: &str) -> f64 {
        self.matrix.get_cell(account, period)
    }

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.matrix, &self.accounts)
    }

    pub fn toggle_section(&mut self, category: Category) -> bool {
        self.visibility.toggle(category)
    }

    pub fn is_expanded(&self, category: Category) -> bool {
        self.visibility.is_expanded(category)
    }

    /// Editable rows currently shown for a section.
    pub fn visible_rows(&self, category: Category) -> &[String] {
        self.visibility
            .visible_rows(category, self.accounts.accounts_in(category))
    }

    /// Switches cadence. A different cadence replaces the period axis and
    /// starts every cell from zero again.
    pub fn set_cadence(&mut self, raw: &str) {
        let cadence = Cadence::parse(raw);
        if cadence == self.cadence {
            return;
        }
        self.cadence = cadence;
        self.rebuild();
    }

    pub fn set_calendar(&mut self, calendar: FiscalCalendar) {
        if calendar == self.calendar {
            return;
        }
        self.calendar = calendar;
        self.rebuild();
    }

    /// Replaces the selected accounts. All cells restart from zero.
    pub fn set_accounts(&mut self, accounts: AccountSet) {
        self.accounts = accounts;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.periods = generate_periods_for(self.cadence, &self.calendar);
        self.matrix = ValueMatrix::new(self.accounts.all_accounts(), self.periods.clone());
        debug!(
            "Rebuilt grid '{}' for {} cadence: {} accounts x {} periods",
            self.name,
            self.cadence,
            self.accounts.len(),
            self.periods.len()
        );
    }

    pub fn summary(&self) -> GridSummary {
        let agg = self.aggregator();

        let sections = self
            .accounts
            .groups()
            .iter()
            .map(|group| SectionSummary {
                category: group.category,
                expanded: self.visibility.is_expanded(group.category),
                rows: group
                    .accounts
                    .iter()
                    .map(|account| RowSummary {
                        account: account.clone(),
                        values: self.matrix.row(account).map(|(_, v)| v).collect(),
                        total: agg.row_total(account),
                    })
                    .collect(),
                period_totals: self
                    .periods
                    .iter()
                    .map(|p| agg.category_period_total(group.category, p))
                    .collect(),
                total: agg.category_total(group.category),
            })
            .collect();

        let profit_total = agg.profit_or_loss();
        let ale_total = agg.ale_balance();

        GridSummary {
            name: self.name.clone(),
            fiscal_year: self.fiscal_year(),
            cadence: self.cadence,
            periods: self.periods.clone(),
            sections,
            income_expense_totals: self
                .periods
                .iter()
                .map(|p| agg.tab_column_total(Tab::IncomeExpense, p))
                .collect(),
            income_expense_grand_total: agg.tab_grand_total(Tab::IncomeExpense),
            profit_or_loss: MetricSummary {
                per_period: self.metric_per_period(|p| agg.profit_or_loss_for(p)),
                total: profit_total,
                status: BalanceStatus::classify(profit_total),
            },
            ale_balance: MetricSummary {
                per_period: self.metric_per_period(|p| agg.ale_balance_for(p)),
                total: ale_total,
                status: BalanceStatus::classify(ale_total),
            },
        }
    }

    fn metric_per_period(&self, metric: impl Fn(&str) -> f64) -> Vec<PeriodMetric> {
        self.periods
            .iter()
            .map(|period| {
                let value = metric(period);
                PeriodMetric {
                    period: period.clone(),
                    value,
                    status: BalanceStatus::classify(value),
                }
            })
            .collect()
    }

    /// All rows, category totals and the two derived metrics, one line each.
    pub fn to_csv(&self) -> String {
        let summary = self.summary();
        let mut output = String::new();

        output.push_str("Section,Account");
        for period in &summary.periods {
            output.push_str(&format!(",{}", csv_field(period)));
        }
        output.push_str(",Total\n");

        for section in &summary.sections {
            for row in &section.rows {
                push_csv_line(&mut output, section.category.label(), &row.account, &row.values, row.total);
            }
            push_csv_line(
                &mut output,
                section.category.label(),
                &format!("Total {}", section.category),
                &section.period_totals,
                section.total,
            );
        }

        push_csv_line(
            &mut output,
            "Summary",
            "Profit/Loss",
            &metric_values(&summary.profit_or_loss),
            summary.profit_or_loss.total,
        );
        push_csv_line(
            &mut output,
            "Summary",
            "ALE Balance",
            &metric_values(&summary.ale_balance),
            summary.ale_balance.total,
        );

        output
    }

    /// Both tabs as Markdown tables. Collapsed sections show only their total.
    pub fn to_markdown(&self) -> String {
        let summary = self.summary();
        let mut output = String::new();

        output.push_str(&format!("# Budget - {}\n\n", summary.name));
        output.push_str(&format!(
            "**Fiscal Year:** {} | **Cadence:** {}\n\n",
            summary.fiscal_year, summary.cadence
        ));

        for tab in Tab::ALL {
            output.push_str(&format!("## {}\n\n", tab.label()));
            output.push_str("| Account |");
            for period in &summary.periods {
                output.push_str(&format!(" {} |", period));
            }
            output.push_str(" Total |\n|---|");
            for _ in &summary.periods {
                output.push_str("---:|");
            }
            output.push_str("---:|\n");

            for section in summary
                .sections
                .iter()
                .filter(|s| tab.categories().contains(&s.category))
            {
                if section.expanded {
                    for row in &section.rows {
                        push_markdown_row(&mut output, &row.account, &row.values, row.total);
                    }
                }
                push_markdown_row(
                    &mut output,
                    &format!("**Total {}**", section.category),
                    &section.period_totals,
                    section.total,
                );
            }

            match tab {
                Tab::IncomeExpense => {
                    push_markdown_row(
                        &mut output,
                        "**Grand Total**",
                        &summary.income_expense_totals,
                        summary.income_expense_grand_total,
                    );
                    push_markdown_row(
                        &mut output,
                        "**Profit/Loss**",
                        &metric_values(&summary.profit_or_loss),
                        summary.profit_or_loss.total,
                    );
                }
                Tab::Balance => {
                    push_markdown_row(
                        &mut output,
                        "**ALE Balance**",
                        &metric_values(&summary.ale_balance),
                        summary.ale_balance.total,
                    );
                }
            }
            output.push('\n');
        }

        output
    }
}

fn metric_values(metric: &MetricSummary) -> Vec<f64> {
    metric.per_period.iter().map(|m| m.value).collect()
}

fn push_csv_line(output: &mut String, section: &str, label: &str, values: &[f64], total: f64) {
    output.push_str(&format!("{},{}", section, csv_field(label)));
    for value in values {
        output.push_str(&format!(",{:.2}", value));
    }
    output.push_str(&format!(",{:.2}\n", total));
}

fn push_markdown_row(output: &mut String, label: &str, values: &[f64], total: f64) {
    output.push_str(&format!("| {} |", label));
    for value in values {
        output.push_str(&format!(" {:.2} |", value));
    }
    output.push_str(&format!(" {:.2} |\n", total));
}

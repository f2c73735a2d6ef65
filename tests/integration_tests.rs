use budget_grid::*;
use std::collections::BTreeMap;

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn read_csv_export(grid: &BudgetGrid) -> anyhow::Result<BTreeMap<(String, String), Vec<f64>>> {
    let csv = grid.to_csv();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let mut rows = BTreeMap::new();

    for record in reader.records() {
        let record = record?;
        let section = record.get(0).unwrap_or_default().to_string();
        let account = record.get(1).unwrap_or_default().to_string();
        let values = record
            .iter()
            .skip(2)
            .map(|v| v.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.insert((section, account), values);
    }

    Ok(rows)
}

fn small_business() -> BudgetPayload {
    BudgetPayload {
        name: "Corner Bakery".to_string(),
        fiscal_year: "2025-26".to_string(),
        period: "quarterly".to_string(),
        income_accounts: labels(&["Bread Sales", "Catering"]),
        expense_accounts: labels(&["Flour", "Wages", "Rent"]),
        asset_accounts: labels(&["Cash at Bank", "Ovens"]),
        liability_accounts: labels(&["Equipment Loan"]),
        equity_accounts: labels(&["Owner Capital"]),
    }
}

#[test]
fn test_every_cadence_builds_a_dense_grid() {
    for (cadence, expected) in [
        ("monthly", 12),
        ("quarterly", 4),
        ("half-yearly", 2),
        ("yearly", 1),
        ("", 12),
        ("biweekly", 12),
    ] {
        let payload = BudgetPayload {
            period: cadence.to_string(),
            ..small_business()
        };
        let grid = build_grid(&payload);

        assert_eq!(grid.periods().len(), expected, "cadence '{}'", cadence);
        for account in grid.accounts().all_accounts() {
            for period in grid.periods() {
                assert!(grid.matrix().contains(&account, period));
                assert_eq!(grid.get_cell(&account, period), 0.0);
            }
        }
    }
}

#[test]
fn test_bakery_quarter_plan() {
    let mut grid = build_grid(&small_business());
    let quarters = grid.periods().to_vec();

    for (i, quarter) in quarters.iter().enumerate() {
        let bump = i as f64 * 1_000.0;
        grid.set_value("Bread Sales", quarter, 20_000.0 + bump);
        grid.set_value("Catering", quarter, 5_000.0);
        grid.set_value("Flour", quarter, 6_000.0);
        grid.set_value("Wages", quarter, 9_000.0);
        grid.set_value("Rent", quarter, 3_000.0);
    }
    grid.set_cell("Catering", "Q4 2025", "12,500");

    let agg = grid.aggregator();
    assert_eq!(agg.row_total("Bread Sales"), 86_000.0);
    assert_eq!(agg.row_total("Catering"), 27_500.0);
    assert_eq!(agg.category_total(Category::Income), 113_500.0);
    assert_eq!(agg.category_total(Category::Expense), 72_000.0);
    assert_eq!(agg.profit_or_loss(), 41_500.0);
    assert_eq!(agg.profit_or_loss_for("Q1 2025"), 7_000.0);
    assert_eq!(agg.profit_or_loss_for("Q4 2025"), 17_500.0);

    let per_period: f64 = quarters.iter().map(|q| agg.profit_or_loss_for(q)).sum();
    assert_eq!(per_period, agg.profit_or_loss());
}

#[test]
fn test_balance_tab_check() {
    let mut grid = build_grid(&small_business());
    grid.set_value("Cash at Bank", "Q1 2025", 40_000.0);
    grid.set_value("Ovens", "Q1 2025", 60_000.0);
    grid.set_value("Equipment Loan", "Q1 2025", 55_000.0);
    grid.set_value("Owner Capital", "Q1 2025", 45_000.0);
    grid.set_value("Cash at Bank", "Q2 2025", 10_000.0);
    grid.set_value("Equipment Loan", "Q3 2025", 2_500.0);

    let agg = grid.aggregator();
    assert_eq!(agg.ale_balance_for("Q1 2025"), 0.0);
    assert_eq!(agg.ale_status_for("Q1 2025"), BalanceStatus::Balanced);
    assert_eq!(agg.ale_status_for("Q2 2025"), BalanceStatus::Surplus);
    assert_eq!(agg.ale_status_for("Q3 2025"), BalanceStatus::Deficit);
    assert_eq!(
        agg.ale_balance(),
        agg.category_total(Category::Asset)
            - agg.category_total(Category::Liability)
            - agg.category_total(Category::Equity)
    );
    assert_eq!(agg.ale_balance(), 7_500.0);
    assert_eq!(agg.tab_grand_total(Tab::Balance), 212_500.0);
}

#[test]
fn test_section_toggles_leave_totals_alone() {
    let mut grid = build_grid(&small_business());
    grid.set_cell("Bread Sales", "Q2 2025", "1500");
    grid.set_cell("Rent", "Q2 2025", "700");
    grid.set_cell("Ovens", "Q3 2025", "900");

    let before = grid.summary();
    for category in Category::ALL {
        grid.toggle_section(category);
    }
    let collapsed = grid.summary();

    assert_eq!(collapsed.profit_or_loss, before.profit_or_loss);
    assert_eq!(collapsed.ale_balance, before.ale_balance);
    for category in Category::ALL {
        let a = before.section(category).unwrap();
        let b = collapsed.section(category).unwrap();
        assert!(a.expanded);
        assert!(!b.expanded);
        assert_eq!(a.total, b.total);
        assert_eq!(a.rows, b.rows);
        assert!(grid.visible_rows(category).is_empty());
    }
}

#[test]
fn test_csv_export_matches_aggregates() -> anyhow::Result<()> {
    let mut grid = build_grid(&small_business());
    grid.set_cell("Bread Sales", "Q1 2025", "1200.5");
    grid.set_cell("Flour", "Q1 2025", "200.25");
    grid.set_cell("Owner Capital", "Q2 2025", "not a number");

    let rows = read_csv_export(&grid)?;
    let agg = grid.aggregator();

    let sales = &rows[&("Income".to_string(), "Bread Sales".to_string())];
    assert_eq!(sales.len(), grid.periods().len() + 1);
    assert_eq!(sales[0], 1200.5);
    assert_eq!(*sales.last().unwrap(), agg.row_total("Bread Sales"));

    let pnl = &rows[&("Summary".to_string(), "Profit/Loss".to_string())];
    assert_eq!(pnl[0], 1000.25);
    assert_eq!(*pnl.last().unwrap(), agg.profit_or_loss());

    let equity = &rows[&("Equity".to_string(), "Total Equity".to_string())];
    assert!(equity.iter().all(|v| *v == 0.0));

    Ok(())
}

#[test]
fn test_partial_payload_from_json() -> anyhow::Result<()> {
    let mut grid = build_grid_from_json(r#"{"incomeAccounts": ["Grants"]}"#)?;
    assert_eq!(grid.name(), "");
    assert_eq!(grid.cadence(), Cadence::Monthly);
    assert_eq!(grid.periods().first().map(String::as_str), Some("Apr 2025"));

    grid.set_cell("Grants", "Mar 2026", "250");
    assert_eq!(grid.aggregator().profit_or_loss(), 250.0);
    assert_eq!(grid.aggregator().ale_balance(), 0.0);

    Ok(())
}

#[test]
fn test_repeated_account_shares_one_row() {
    let payload = BudgetPayload {
        income_accounts: labels(&["Interest", "Interest"]),
        expense_accounts: labels(&["Interest"]),
        ..Default::default()
    };
    let mut grid = build_grid(&payload);

    assert_eq!(grid.accounts().all_accounts(), labels(&["Interest"]));
    assert_eq!(grid.accounts().duplicates().len(), 2);

    grid.set_cell("Interest", "Apr 2025", "80");
    assert_eq!(grid.aggregator().category_total(Category::Income), 80.0);
    assert_eq!(grid.aggregator().category_total(Category::Expense), 0.0);
}

#[test]
fn test_fiscal_year_drives_labels() {
    let payload = BudgetPayload {
        fiscal_year: "FY 2027-28".to_string(),
        period: "yearly".to_string(),
        ..small_business()
    };
    let grid = build_grid(&payload);
    assert_eq!(grid.periods(), ["FY 2027-28"]);
    assert_eq!(grid.calendar().start_year(), 2027);
}

#[test]
fn test_schema_generation() {
    let schema = BudgetPayload::schema_as_json().unwrap();
    assert!(schema.contains("liabilityAccounts"));
    assert!(schema.contains("half-yearly"));
}

use budget_grid::*;

fn main() {
    println!("📊 Budget Grid Demo\n");

    let payload = BudgetPayload {
        name: "Community Hall Society".to_string(),
        fiscal_year: "2025-26".to_string(),
        period: "quarterly".to_string(),
        income_accounts: vec!["Membership Fees".to_string(), "Hall Rental".to_string()],
        expense_accounts: vec!["Maintenance".to_string(), "Electricity".to_string()],
        asset_accounts: vec!["Bank Balance".to_string()],
        liability_accounts: vec!["Security Deposits".to_string()],
        equity_accounts: vec!["General Fund".to_string()],
    };

    let mut grid = build_grid(&payload);

    println!("📋 Periods: {}", grid.periods().join(", "));

    let entries = [
        ("Membership Fees", "Q1 2025", "12000"),
        ("Hall Rental", "Q1 2025", "4500"),
        ("Maintenance", "Q1 2025", "3200"),
        ("Electricity", "Q1 2025", "1800"),
        ("Membership Fees", "Q2 2025", "11500"),
        ("Electricity", "Q2 2025", "oops"),
        ("Bank Balance", "Q1 2025", "50000"),
        ("Security Deposits", "Q1 2025", "8000"),
        ("General Fund", "Q1 2025", "42000"),
    ];
    for (account, period, raw) in entries {
        grid.set_cell(account, period, raw);
    }

    let totals = grid.aggregator();
    println!("\n💰 Profit/Loss by quarter:");
    for period in grid.periods() {
        println!("  {}: {:.2}", period, totals.profit_or_loss_for(period));
    }
    println!("  Total: {:.2}", totals.profit_or_loss());

    let status = totals.ale_status_for("Q1 2025");
    println!(
        "\n⚖️  ALE balance for Q1 2025: {:.2} ({:?}, {})",
        totals.ale_balance_for("Q1 2025"),
        status,
        status.color()
    );

    grid.toggle_section(Category::Expense);
    println!("\n{}", grid.to_markdown());
}

use crate::schema::{BudgetPayload, Category};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub accounts: Vec<String>,
}

impl CategoryGroup {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// A label that was dropped because an earlier row already used it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateAccount {
    pub name: String,
    /// Category that kept the row.
    pub kept_in: Category,
    /// Category the repeated label was selected under.
    pub dropped_from: Category,
}

/// The selected accounts, grouped by category in display order.
///
/// Account labels double as row keys, so each label owns at most one row
/// across the whole set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSet {
    groups: Vec<CategoryGroup>,
    duplicates: Vec<DuplicateAccount>,
    #[serde(skip)]
    index: HashMap<String, Category>,
}

impl Default for AccountSet {
    fn default() -> Self {
        Self::from_lists::<_, String>(Category::ALL.map(|_| Vec::<String>::new()))
    }
}

impl AccountSet {
    pub fn resolve<S: AsRef<str>>(
        income: &[S],
        expense: &[S],
        asset: &[S],
        liability: &[S],
        equity: &[S],
    ) -> Self {
        Self::from_lists([income, expense, asset, liability, equity])
    }

    pub fn from_payload(payload: &BudgetPayload) -> Self {
        Self::from_lists::<_, String>(Category::ALL.map(|category| payload.accounts_for(category)))
    }

    fn from_lists<L, S>(lists: [L; 5]) -> Self
    where
        L: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, Category> = HashMap::new();
        let mut duplicates = Vec::new();
        let mut groups = Vec::with_capacity(Category::ALL.len());

        for (category, labels) in Category::ALL.into_iter().zip(lists.iter()) {
            let mut accounts = Vec::new();

            for raw in labels.as_ref() {
                let name = raw.as_ref().trim();
                if name.is_empty() {
                    continue;
                }

                if let Some(&kept_in) = index.get(name) {
                    warn!(
                        "Account '{}' selected under {} is already a {} row; ignoring the repeat",
                        name, category, kept_in
                    );
                    duplicates.push(DuplicateAccount {
                        name: name.to_string(),
                        kept_in,
                        dropped_from: category,
                    });
                    continue;
                }

                index.insert(name.to_string(), category);
                accounts.push(name.to_string());
            }

            groups.push(CategoryGroup { category, accounts });
        }

        Self {
            groups,
            duplicates,
            index,
        }
    }

    /// Category groups in fixed display order, empty ones included.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn group(&self, category: Category) -> &CategoryGroup {
        &self.groups[category.index()]
    }

    pub fn accounts_in(&self, category: Category) -> &[String] {
        &self.group(category).accounts
    }

    /// Every account in category order, then selection order.
    pub fn all_accounts(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|g| g.accounts.iter().cloned())
            .collect()
    }

    /// Accounts of several categories, concatenated in the order given.
    pub fn accounts_of(&self, categories: &[Category]) -> Vec<String> {
        categories
            .iter()
            .flat_map(|c| self.accounts_in(*c).iter().cloned())
            .collect()
    }

    pub fn category_of(&self, account: &str) -> Option<Category> {
        self.index.get(account).copied()
    }

    pub fn contains(&self, account: &str) -> bool {
        self.index.contains_key(account)
    }

    pub fn duplicates(&self) -> &[DuplicateAccount] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("Category,Account Name\n");

        for group in &self.groups {
            for account in &group.accounts {
                output.push_str(&format!("{},{}\n", group.category, csv_field(account)));
            }
        }

        output
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Selected Accounts\n\n");

        for group in &self.groups {
            output.push_str(&format!("## {}\n\n", group.category));
            if group.accounts.is_empty() {
                output.push_str("_No accounts selected_\n\n");
                continue;
            }
            for account in &group.accounts {
                output.push_str(&format!("- {}\n", account));
            }
            output.push('\n');
        }

        output
    }
}

pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

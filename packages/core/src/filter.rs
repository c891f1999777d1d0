// ABOUTME: Filter selection for todo list queries
// ABOUTME: Resolves present filters to exactly one precedence-ordered combination

/// Validated list filters. Values are kept as received because only the
/// first present enum field is checked on a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search_q: String,
}

/// One of the eight fixed read branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCombination<'a> {
    StatusPriorityCategory {
        status: &'a str,
        priority: &'a str,
        category: &'a str,
    },
    StatusPriority {
        status: &'a str,
        priority: &'a str,
    },
    StatusCategory {
        status: &'a str,
        category: &'a str,
    },
    PriorityCategory {
        priority: &'a str,
        category: &'a str,
    },
    Status(&'a str),
    Priority(&'a str),
    Category(&'a str),
    Unfiltered,
}

impl TodoFilter {
    /// Branch order: all three, status+priority, status+category,
    /// priority+category, status, priority, category, none.
    pub fn combination(&self) -> FilterCombination<'_> {
        let status = self.status.as_deref();
        let priority = self.priority.as_deref();
        let category = self.category.as_deref();

        match (status, priority, category) {
            (Some(status), Some(priority), Some(category)) => {
                FilterCombination::StatusPriorityCategory {
                    status,
                    priority,
                    category,
                }
            }
            (Some(status), Some(priority), None) => {
                FilterCombination::StatusPriority { status, priority }
            }
            (Some(status), None, Some(category)) => {
                FilterCombination::StatusCategory { status, category }
            }
            (None, Some(priority), Some(category)) => {
                FilterCombination::PriorityCategory { priority, category }
            }
            (Some(status), None, None) => FilterCombination::Status(status),
            (None, Some(priority), None) => FilterCombination::Priority(priority),
            (None, None, Some(category)) => FilterCombination::Category(category),
            (None, None, None) => FilterCombination::Unfiltered,
        }
    }

    /// LIKE pattern matching `search_q` literally anywhere in the text.
    /// Used with `ESCAPE '\'`.
    pub fn search_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.search_q.len() + 2);
        pattern.push('%');
        for ch in self.search_q.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

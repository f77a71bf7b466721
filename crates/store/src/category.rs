//! The closed set of expense categories.

use serde::{Deserialize, Serialize};

/// Expense category. Only these five values are ever persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Other,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }

    /// Resolves a category from its canonical name. Matching is exact; there
    /// is no case folding.
    pub fn from_name(value: &str) -> Option<Category> {
        match value {
            "Food" => Some(Self::Food),
            "Transport" => Some(Self::Transport),
            "Shopping" => Some(Self::Shopping),
            "Bills" => Some(Self::Bills),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

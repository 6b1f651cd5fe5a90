use core::str::FromStr;

use serde::{Deserialize, Serialize};

use vitashop_core::{DomainError, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vitamins,
    Protein,
    Omega,
    Herbal,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Vitamins,
        Category::Protein,
        Category::Omega,
        Category::Herbal,
    ];

    /// Stable slug, matching the serialized form.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Vitamins => "vitamins",
            Category::Protein => "protein",
            Category::Omega => "omega",
            Category::Herbal => "herbal",
        }
    }

    /// Display name shown on product cards and category tiles.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vitamins => "비타민 & 미네랄",
            Category::Protein => "단백질 & 운동",
            Category::Omega => "오메가 & 오일",
            Category::Herbal => "한방 & 허브",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

/// Category selection for the product grid: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

/// A catalog product.
///
/// Prices are integers in the smallest currency unit (won). Products are immutable
/// once loaded; the catalog only ever hands out shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: u64,
    pub description: String,
    /// Icon class used by the presentation layer (e.g. "fas fa-capsules").
    pub icon: String,
    /// Average rating in `[0, 5]`.
    pub rating: f32,
    pub reviews: u32,
}

impl Product {
    /// Case-insensitive substring match against name and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_slugs() {
        assert_eq!("omega".parse::<Category>().unwrap(), Category::Omega);
        assert!("minerals".parse::<Category>().is_err());
    }

    #[test]
    fn filter_parses_all_and_categories() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "herbal".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Herbal)
        );
    }

    #[test]
    fn filter_all_matches_every_category() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.matches(category));
        }
        assert!(!CategoryFilter::Only(Category::Protein).matches(Category::Vitamins));
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Vitamins).unwrap();
        assert_eq!(json, "\"vitamins\"");
    }
}

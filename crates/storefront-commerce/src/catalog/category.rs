//! Category types for product organization.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of storefront categories.
///
/// Source data is inconsistent about separators (`home decor` on products,
/// `home-decor` on category records), so both spellings deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Lighting,
    Furniture,
    Kitchenware,
    Electronics,
    #[serde(alias = "home decor")]
    HomeDecor,
    #[serde(alias = "smart home")]
    SmartHome,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Category; 6] = [
        Category::Lighting,
        Category::Furniture,
        Category::Kitchenware,
        Category::Electronics,
        Category::HomeDecor,
        Category::SmartHome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lighting => "lighting",
            Category::Furniture => "furniture",
            Category::Kitchenware => "kitchenware",
            Category::Electronics => "electronics",
            Category::HomeDecor => "home-decor",
            Category::SmartHome => "smart-home",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Lighting => "Lighting",
            Category::Furniture => "Furniture",
            Category::Kitchenware => "Kitchenware",
            Category::Electronics => "Electronics",
            Category::HomeDecor => "Home Decor",
            Category::SmartHome => "Smart Home",
        }
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category record shown on the categories page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryInfo {
    /// The category this record describes.
    pub id: Category,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Banner image URL.
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!("home-decor".parse::<Category>().unwrap(), Category::HomeDecor);
        assert_eq!("Home Decor".parse::<Category>().unwrap(), Category::HomeDecor);
        assert_eq!("smart_home".parse::<Category>().unwrap(), Category::SmartHome);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "garden".parse::<Category>().unwrap_err();
        assert_eq!(err, CommerceError::UnknownCategory("garden".to_string()));
    }

    #[test]
    fn test_serde_alias() {
        let c: Category = serde_json::from_str("\"home decor\"").unwrap();
        assert_eq!(c, Category::HomeDecor);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"home-decor\"");
    }
}

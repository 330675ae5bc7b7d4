use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Pantry,
    Produce,
    Meat,
    Dairy,
    Beverage,
    Snacks,
}

impl Category {
    /// Order in which aisles are laid out for display.
    pub const AISLES: [Category; 6] = [
        Category::Produce,
        Category::Meat,
        Category::Dairy,
        Category::Pantry,
        Category::Beverage,
        Category::Snacks,
    ];

    /// Maps free-form category text onto an aisle. Unknown or blank text lands in the pantry.
    pub fn resolve(raw: &str) -> Self {
        raw.trim().to_lowercase().parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Pantry => "pantry",
            Category::Produce => "produce",
            Category::Meat => "meat",
            Category::Dairy => "dairy",
            Category::Beverage => "beverage",
            Category::Snacks => "snacks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pantry" => Ok(Category::Pantry),
            "produce" => Ok(Category::Produce),
            "meat" => Ok(Category::Meat),
            "dairy" => Ok(Category::Dairy),
            "beverage" => Ok(Category::Beverage),
            "snacks" => Ok(Category::Snacks),
            other => Err(format!("Unknown category: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_and_space_insensitive() {
        assert_eq!(Category::resolve(" Dairy "), Category::Dairy);
        assert_eq!(Category::resolve("PRODUCE"), Category::Produce);
    }

    #[test]
    fn resolve_defaults_to_pantry() {
        assert_eq!(Category::resolve(""), Category::Pantry);
        assert_eq!(Category::resolve("frozen"), Category::Pantry);
    }

    #[test]
    fn from_str_is_strict() {
        assert!("Dairy".parse::<Category>().is_err());
        assert_eq!("snacks".parse::<Category>().unwrap(), Category::Snacks);
    }

    #[test]
    fn aisles_cover_every_category_once() {
        for cat in [
            Category::Pantry,
            Category::Produce,
            Category::Meat,
            Category::Dairy,
            Category::Beverage,
            Category::Snacks,
        ] {
            assert_eq!(Category::AISLES.iter().filter(|c| **c == cat).count(), 1);
        }
    }
}

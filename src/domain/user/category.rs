//! Care service categories offered by providers

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    ChildCare,
    ElderCare,
    PetCare,
}

impl ServiceCategory {
    pub fn all() -> [ServiceCategory; 3] {
        [
            ServiceCategory::ChildCare,
            ServiceCategory::ElderCare,
            ServiceCategory::PetCare,
        ]
    }

    /// Stored representation, matches the JSON form
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::ChildCare => "CHILD_CARE",
            ServiceCategory::ElderCare => "ELDER_CARE",
            ServiceCategory::PetCare => "PET_CARE",
        }
    }

    pub fn parse(s: &str) -> Option<ServiceCategory> {
        match s {
            "CHILD_CARE" => Some(ServiceCategory::ChildCare),
            "ELDER_CARE" => Some(ServiceCategory::ElderCare),
            "PET_CARE" => Some(ServiceCategory::PetCare),
            _ => None,
        }
    }

    /// URL path segment, e.g. `child-care`
    pub fn slug(&self) -> &'static str {
        match self {
            ServiceCategory::ChildCare => "child-care",
            ServiceCategory::ElderCare => "elder-care",
            ServiceCategory::PetCare => "pet-care",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_names() {
        for category in ServiceCategory::all() {
            assert_eq!(ServiceCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ServiceCategory::parse("child-care"), None);
    }

    #[test]
    fn test_slugs() {
        assert_eq!(ServiceCategory::ChildCare.slug(), "child-care");
        assert_eq!(ServiceCategory::ElderCare.slug(), "elder-care");
        assert_eq!(ServiceCategory::PetCare.slug(), "pet-care");
    }

    #[test]
    fn test_json_form() {
        let json = serde_json::to_string(&vec![ServiceCategory::PetCare]).unwrap();
        assert_eq!(json, "[\"PET_CARE\"]");
    }
}

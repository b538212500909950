use serde::{Deserialize, Serialize};

use stockfront_core::{CategoryId, DomainError, DomainResult, Entity};

/// Category size class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Size {
    Small,
    Medium,
    Large,
}

/// Packaging kind for products of a category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Packaging {
    Box,
    Bag,
    Bottle,
    Can,
}

/// Aggregate root: Category.
///
/// The id is assigned by the remote service on creation and immutable
/// thereafter; a not-yet-persisted category carries `id: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    id: Option<CategoryId>,
    name: String,
    size: Size,
    packaging: Packaging,
}

impl Category {
    /// Build a new, not-yet-persisted category.
    pub fn new(
        name: impl Into<String>,
        size: Size,
        packaging: Packaging,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        Ok(Self {
            id: None,
            name,
            size,
            packaging,
        })
    }

    /// Attach the server-assigned identifier (persistence seam).
    pub fn with_id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Produce a renamed copy, keeping the identifier.
    pub fn with_name(&self, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        Ok(Self {
            name,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn packaging(&self) -> Packaging {
        self.packaging
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Option<CategoryId> {
        self.id
    }
}

// Equality is by identifier once both sides are persisted; otherwise by
// value of all fields (only meaningful in tests).
impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.id == other.id
                    && self.name == other.name
                    && self.size == other.size
                    && self.packaging == other.packaging
            }
        }
    }
}

impl Eq for Category {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_rejects_blank_name() {
        let err = Category::new("   ", Size::Small, Packaging::Box).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for blank name"),
        }
    }

    #[test]
    fn new_category_has_no_id() {
        let category = Category::new("Beverages", Size::Medium, Packaging::Bottle).unwrap();
        assert!(category.id().is_none());
        assert!(!category.is_persisted());
    }

    #[test]
    fn persisted_categories_compare_by_id() {
        let a = Category::new("Beverages", Size::Medium, Packaging::Bottle)
            .unwrap()
            .with_id(CategoryId::new(1));
        let b = Category::new("Renamed later", Size::Large, Packaging::Can)
            .unwrap()
            .with_id(CategoryId::new(1));
        assert_eq!(a, b);

        let c = b.clone().with_id(CategoryId::new(2));
        assert_ne!(a, c);
    }

    #[test]
    fn unpersisted_categories_compare_by_value() {
        let a = Category::new("Snacks", Size::Small, Packaging::Bag).unwrap();
        let b = Category::new("Snacks", Size::Small, Packaging::Bag).unwrap();
        assert_eq!(a, b);

        let c = Category::new("Snacks", Size::Large, Packaging::Bag).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn with_name_keeps_id_and_validates() {
        let category = Category::new("Snacks", Size::Small, Packaging::Bag)
            .unwrap()
            .with_id(CategoryId::new(7));
        let renamed = category.with_name("Sweets").unwrap();
        assert_eq!(renamed.id(), Some(CategoryId::new(7)));
        assert_eq!(renamed.name(), "Sweets");
        assert!(category.with_name(" ").is_err());
    }

    #[test]
    fn enum_names_round_trip_on_the_wire() {
        let json = serde_json::to_value(Size::Small).unwrap();
        assert_eq!(json, serde_json::json!("SMALL"));
        let json = serde_json::to_value(Packaging::Bottle).unwrap();
        assert_eq!(json, serde_json::json!("BOTTLE"));
    }
}

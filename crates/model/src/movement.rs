use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockfront_core::{DomainError, DomainResult, Entity, MovementId};

use crate::product::Product;

/// Direction of a stock movement. Quantity is always strictly positive;
/// direction is carried here, never by sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entry,
    Exit,
}

/// A recorded change to a product's tracked stock quantity.
///
/// The movement owns a `Product` snapshot taken at creation time. The remote
/// service recomputes and persists the product's authoritative quantity; the
/// snapshot is only used for client-side pre-validation and optimistic UI
/// feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    id: Option<MovementId>,
    product: Product,
    date: DateTime<Utc>,
    quantity: u32,
    #[serde(rename = "type")]
    movement_type: MovementType,
}

impl Movement {
    /// Record a new movement against a product snapshot.
    ///
    /// The date is stamped at creation time and never mutated afterwards.
    pub fn record(
        product: Product,
        movement_type: MovementType,
        quantity: u32,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation(
                "movement quantity must be strictly positive",
            ));
        }
        Ok(Self {
            id: None,
            product,
            date: Utc::now(),
            quantity,
            movement_type,
        })
    }

    /// Attach the server-assigned identifier (persistence seam).
    pub fn with_id(mut self, id: MovementId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn movement_type(&self) -> MovementType {
        self.movement_type
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> Option<MovementId> {
        self.id
    }
}

// Equality is by identifier once both sides are persisted; otherwise by
// value of all fields (only meaningful in tests).
impl PartialEq for Movement {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.id == other.id
                    && self.product == other.product
                    && self.date == other.date
                    && self.quantity == other.quantity
                    && self.movement_type == other.movement_type
            }
        }
    }
}

impl Eq for Movement {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, Packaging, Size};
    use rust_decimal::Decimal;
    use stockfront_core::{CategoryId, ProductId};

    fn test_product() -> Product {
        let category = Category::new("Beverages", Size::Medium, Packaging::Bottle)
            .unwrap()
            .with_id(CategoryId::new(1));
        Product::new("Orange juice", Decimal::ZERO, "bottle", 10, 5, 50, category)
            .unwrap()
            .with_id(ProductId::new(1))
    }

    #[test]
    fn record_rejects_zero_quantity() {
        let err = Movement::record(test_product(), MovementType::Exit, 0).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error for zero quantity"),
        }
    }

    #[test]
    fn record_stamps_creation_date() {
        let before = Utc::now();
        let movement = Movement::record(test_product(), MovementType::Entry, 3).unwrap();
        let after = Utc::now();
        assert!(movement.date() >= before && movement.date() <= after);
        assert!(movement.id().is_none());
    }

    #[test]
    fn movement_type_uses_wire_enum_names() {
        assert_eq!(
            serde_json::to_value(MovementType::Entry).unwrap(),
            serde_json::json!("ENTRY")
        );
        assert_eq!(
            serde_json::to_value(MovementType::Exit).unwrap(),
            serde_json::json!("EXIT")
        );
    }

    #[test]
    fn serialized_movement_renames_type_field() {
        let movement = Movement::record(test_product(), MovementType::Exit, 3)
            .unwrap()
            .with_id(MovementId::new(9));
        let json = serde_json::to_value(&movement).unwrap();
        assert_eq!(json["type"], serde_json::json!("EXIT"));
        assert_eq!(json["quantity"], serde_json::json!(3));
        assert_eq!(json["id"], serde_json::json!(9));
        assert!(json["date"].is_string());
        assert_eq!(json["product"]["name"], serde_json::json!("Orange juice"));
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockfront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::category::Category;

/// Aggregate root: Product.
///
/// Quantities are unsigned, so negative stock is unrepresentable. The wire
/// representation embeds the full `Category` object in both read and write
/// bodies (one convention, held everywhere).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: Option<ProductId>,
    name: String,
    unit_price: Decimal,
    unit: String,
    stock_quantity: u32,
    min_quantity: u32,
    max_quantity: u32,
    category: Category,
}

impl Product {
    /// Build a new, not-yet-persisted product.
    pub fn new(
        name: impl Into<String>,
        unit_price: Decimal,
        unit: impl Into<String>,
        stock_quantity: u32,
        min_quantity: u32,
        max_quantity: u32,
        category: Category,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if unit_price.is_sign_negative() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        if max_quantity < min_quantity {
            return Err(DomainError::validation(format!(
                "max quantity ({max_quantity}) cannot be below min quantity ({min_quantity})"
            )));
        }
        Ok(Self {
            id: None,
            name,
            unit_price,
            unit: unit.into(),
            stock_quantity,
            min_quantity,
            max_quantity,
            category,
        })
    }

    /// Attach the server-assigned identifier (persistence seam).
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Produce a copy with a different tracked stock quantity.
    ///
    /// This is a local snapshot update only; the remote service recomputes
    /// and persists the authoritative quantity when a movement is recorded.
    pub fn with_stock_quantity(&self, stock_quantity: u32) -> Self {
        Self {
            stock_quantity,
            ..self.clone()
        }
    }

    /// Produce a copy with different min/max thresholds.
    pub fn with_thresholds(&self, min_quantity: u32, max_quantity: u32) -> DomainResult<Self> {
        if max_quantity < min_quantity {
            return Err(DomainError::validation(format!(
                "max quantity ({max_quantity}) cannot be below min quantity ({min_quantity})"
            )));
        }
        Ok(Self {
            min_quantity,
            max_quantity,
            ..self.clone()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    pub fn category(&self) -> &Category {
        &self.category
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }
}

// Equality is by identifier once both sides are persisted; otherwise by
// value of all fields (only meaningful in tests).
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.id == other.id
                    && self.name == other.name
                    && self.unit_price == other.unit_price
                    && self.unit == other.unit
                    && self.stock_quantity == other.stock_quantity
                    && self.min_quantity == other.min_quantity
                    && self.max_quantity == other.max_quantity
                    && self.category == other.category
            }
        }
    }
}

impl Eq for Product {}

//! Movement evaluator: pure pre-validation of a proposed stock movement.
//!
//! Every caller intending to submit a movement must evaluate it first, to
//! fail fast client-side. The remote service stays the authority and may
//! independently reject.

use stockfront_core::{DomainError, DomainResult};

use crate::movement::MovementType;
use crate::product::Product;

/// Position of a resulting quantity relative to the product's configured
/// min/max operating range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ThresholdState {
    BelowMin,
    AboveMax,
    Normal,
}

/// Outcome of evaluating a proposed movement against a product snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Stock quantity the product would hold after the movement.
    pub resulting_quantity: u32,
    pub threshold: ThresholdState,
}

/// Compute the post-movement quantity and classify it against thresholds.
///
/// Fails with `Validation` for a zero quantity and with `InsufficientStock`
/// when an exit would drive the stock below zero. No side effects.
pub fn evaluate(
    product: &Product,
    movement_type: MovementType,
    quantity: u32,
) -> DomainResult<Evaluation> {
    if quantity == 0 {
        return Err(DomainError::validation(
            "movement quantity must be strictly positive",
        ));
    }

    let stock = product.stock_quantity();
    let resulting_quantity = match movement_type {
        MovementType::Entry => stock.checked_add(quantity).ok_or_else(|| {
            DomainError::validation("resulting stock quantity overflows the tracked range")
        })?,
        MovementType::Exit => {
            if quantity > stock {
                return Err(DomainError::insufficient_stock(stock, quantity));
            }
            stock - quantity
        }
    };

    let threshold = if resulting_quantity < product.min_quantity() {
        ThresholdState::BelowMin
    } else if resulting_quantity > product.max_quantity() {
        ThresholdState::AboveMax
    } else {
        ThresholdState::Normal
    };

    Ok(Evaluation {
        resulting_quantity,
        threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, Packaging, Size};
    use rust_decimal::Decimal;
    use stockfront_core::CategoryId;

    fn product_with(stock: u32, min: u32, max: u32) -> Product {
        let category = Category::new("Beverages", Size::Medium, Packaging::Bottle)
            .unwrap()
            .with_id(CategoryId::new(1));
        Product::new("Orange juice", Decimal::ZERO, "bottle", stock, min, max, category).unwrap()
    }

    #[test]
    fn exit_within_stock_is_normal() {
        // stock=10 min=5 max=50, EXIT 3 -> 7, inside the operating range
        let result = evaluate(&product_with(10, 5, 50), MovementType::Exit, 3).unwrap();
        assert_eq!(result.resulting_quantity, 7);
        assert_eq!(result.threshold, ThresholdState::Normal);
    }

    #[test]
    fn entry_adds_exactly() {
        // stock=4 min=5 max=50, ENTRY 10 -> 14
        let result = evaluate(&product_with(4, 5, 50), MovementType::Entry, 10).unwrap();
        assert_eq!(result.resulting_quantity, 14);
        assert_eq!(result.threshold, ThresholdState::Normal);
    }

    #[test]
    fn exit_beyond_stock_fails_with_insufficient_stock() {
        // stock=2, EXIT 5 must be rejected before any network call
        let err = evaluate(&product_with(2, 5, 50), MovementType::Exit, 5).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                available: 2,
                requested: 5
            }
        );
    }

    #[test]
    fn exit_down_to_zero_is_allowed() {
        let result = evaluate(&product_with(5, 0, 50), MovementType::Exit, 5).unwrap();
        assert_eq!(result.resulting_quantity, 0);
        assert_eq!(result.threshold, ThresholdState::Normal);
    }

    #[test]
    fn zero_quantity_is_rejected_for_both_directions() {
        for movement_type in [MovementType::Entry, MovementType::Exit] {
            let err = evaluate(&product_with(10, 0, 50), movement_type, 0).unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                _ => panic!("expected Validation error for zero quantity"),
            }
        }
    }

    #[test]
    fn resulting_below_min_classifies_below_min() {
        let result = evaluate(&product_with(10, 8, 50), MovementType::Exit, 4).unwrap();
        assert_eq!(result.resulting_quantity, 6);
        assert_eq!(result.threshold, ThresholdState::BelowMin);
    }

    #[test]
    fn resulting_above_max_classifies_above_max() {
        let result = evaluate(&product_with(45, 5, 50), MovementType::Entry, 10).unwrap();
        assert_eq!(result.resulting_quantity, 55);
        assert_eq!(result.threshold, ThresholdState::AboveMax);
    }

    #[test]
    fn boundaries_are_inclusive() {
        // landing exactly on min or max is Normal
        let at_min = evaluate(&product_with(10, 5, 50), MovementType::Exit, 5).unwrap();
        assert_eq!(at_min.threshold, ThresholdState::Normal);

        let at_max = evaluate(&product_with(40, 5, 50), MovementType::Entry, 10).unwrap();
        assert_eq!(at_max.threshold, ThresholdState::Normal);
    }

    #[test]
    fn entry_overflow_is_a_validation_error() {
        let err = evaluate(&product_with(u32::MAX, 0, u32::MAX), MovementType::Entry, 1)
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("overflows")),
            _ => panic!("expected Validation error on overflow"),
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: an entry adds exactly, an exit subtracts exactly.
            #[test]
            fn arithmetic_is_exact(
                stock in 0u32..1_000_000,
                quantity in 1u32..1_000_000,
            ) {
                let product = product_with(stock, 0, u32::MAX);

                let entry = evaluate(&product, MovementType::Entry, quantity).unwrap();
                prop_assert_eq!(entry.resulting_quantity, stock + quantity);

                let exit = evaluate(&product, MovementType::Exit, quantity);
                if quantity > stock {
                    prop_assert_eq!(
                        exit.unwrap_err(),
                        DomainError::InsufficientStock { available: stock, requested: quantity }
                    );
                } else {
                    prop_assert_eq!(exit.unwrap().resulting_quantity, stock - quantity);
                }
            }

            /// Property: threshold classification matches its definition, and
            /// BelowMin/AboveMax never coincide given max >= min.
            #[test]
            fn classification_is_consistent(
                stock in 0u32..100_000,
                quantity in 1u32..100_000,
                min in 0u32..100_000,
                span in 0u32..100_000,
            ) {
                let max = min + span;
                let product = product_with(stock, min, max);

                if let Ok(result) = evaluate(&product, MovementType::Entry, quantity) {
                    let q = result.resulting_quantity;
                    let expected = if q < min {
                        ThresholdState::BelowMin
                    } else if q > max {
                        ThresholdState::AboveMax
                    } else {
                        ThresholdState::Normal
                    };
                    prop_assert_eq!(result.threshold, expected);
                    // mutually exclusive by construction
                    prop_assert!(!(q < min && q > max));
                }
            }

            /// Property: evaluation never mutates the snapshot.
            #[test]
            fn evaluation_is_pure(
                stock in 0u32..100_000,
                quantity in 1u32..100_000,
            ) {
                let product = product_with(stock, 5, 50);
                let before = product.clone();
                let _ = evaluate(&product, MovementType::Exit, quantity);
                let _ = evaluate(&product, MovementType::Entry, quantity);
                prop_assert_eq!(product, before);
            }
        }
    }
}

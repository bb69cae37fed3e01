//! Raw purchasable ingredients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use menucost_core::{DomainError, DomainResult, Entity, IngredientId};

use crate::unit::Unit;
use crate::validate;

/// A raw material with a declared unit and a purchase price per that unit.
///
/// Examples: milk 3.2% at 300 per liter, arabica at 5000 per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub unit: Unit,
    /// Price per declared unit.
    pub purchase_price: f64,
    #[serde(default)]
    pub stock_quantity: f64,
    #[serde(default)]
    pub min_stock: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ingredient {
    /// Stock has fallen to (or below) the warning threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock
    }

    /// Purchase value of the stock on hand.
    pub fn stock_value(&self) -> f64 {
        self.stock_quantity * self.purchase_price
    }
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Input for a new ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub unit: Unit,
    pub purchase_price: f64,
    #[serde(default)]
    pub stock_quantity: f64,
    #[serde(default)]
    pub min_stock: f64,
}

impl NewIngredient {
    pub fn validate(&self) -> DomainResult<()> {
        validate::name("name", &self.name)?;
        validate::optional_text("category", self.category.as_deref(), validate::CATEGORY_MAX)?;
        validate::non_negative("purchase_price", self.purchase_price)?;
        validate::non_negative("stock_quantity", self.stock_quantity)?;
        validate::non_negative("min_stock", self.min_stock)
    }

    pub(crate) fn into_ingredient(self, id: IngredientId, now: DateTime<Utc>) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            category: self.category,
            unit: self.unit,
            purchase_price: self.purchase_price,
            stock_quantity: self.stock_quantity,
            min_stock: self.min_stock,
            created_at: Some(now),
            updated_at: None,
        }
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub stock_quantity: Option<f64>,
    #[serde(default)]
    pub min_stock: Option<f64>,
}

impl IngredientPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate::name("name", name)?;
        }
        validate::optional_text("category", self.category.as_deref(), validate::CATEGORY_MAX)?;
        if let Some(price) = self.purchase_price {
            validate::non_negative("purchase_price", price)?;
        }
        if let Some(qty) = self.stock_quantity {
            validate::non_negative("stock_quantity", qty)?;
        }
        if let Some(min) = self.min_stock {
            validate::non_negative("min_stock", min)?;
        }
        Ok(())
    }

    pub(crate) fn apply_to(self, ingredient: &mut Ingredient, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            ingredient.name = name;
        }
        if let Some(category) = self.category {
            ingredient.category = Some(category);
        }
        if let Some(unit) = self.unit {
            ingredient.unit = unit;
        }
        if let Some(price) = self.purchase_price {
            ingredient.purchase_price = price;
        }
        if let Some(qty) = self.stock_quantity {
            ingredient.stock_quantity = qty;
        }
        if let Some(min) = self.min_stock {
            ingredient.min_stock = min;
        }
        ingredient.updated_at = Some(now);
    }
}

/// Signed stock movement: positive for a delivery, negative for consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub quantity: f64,
    #[serde(default)]
    pub reason: Option<String>,
}

impl StockAdjustment {
    /// Stock level after applying this movement to `ingredient`.
    pub(crate) fn resulting_stock(&self, ingredient: &Ingredient) -> DomainResult<f64> {
        if !self.quantity.is_finite() {
            return Err(DomainError::validation("quantity must be a finite number"));
        }
        let next = ingredient.stock_quantity + self.quantity;
        if next < 0.0 {
            return Err(DomainError::validation(format!(
                "insufficient stock of '{}': available {}, requested {}",
                ingredient.name,
                ingredient.stock_quantity,
                self.quantity.abs()
            )));
        }
        Ok(next)
    }
}

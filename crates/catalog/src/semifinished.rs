//! Semi-finished preparations (tea base, syrups, sauces).
//!
//! A semifinished item is cooked in batches from ingredients and then used by
//! weight inside recipes. It is never sold on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use menucost_core::{DomainResult, Entity, IngredientId, SemifinishedId, ValueObject};

use crate::unit::Unit;
use crate::validate;

fn default_output_quantity() -> f64 {
    100.0
}

/// One ingredient line of a semifinished batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemifinishedIngredient {
    pub ingredient_id: IngredientId,
    /// Weight in grams (millilitres for liquids, count for pieces).
    #[serde(alias = "weight_grams")]
    pub weight: f64,
}

impl ValueObject for SemifinishedIngredient {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semifinished {
    pub id: SemifinishedId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    /// Total yield of one batch, in grams/mL.
    #[serde(default = "default_output_quantity")]
    pub output_quantity: f64,
    #[serde(default)]
    pub ingredients: Vec<SemifinishedIngredient>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Semifinished {
    pub fn references_ingredient(&self, id: &IngredientId) -> bool {
        self.ingredients.iter().any(|line| &line.ingredient_id == id)
    }
}

impl Entity for Semifinished {
    type Id = SemifinishedId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn validate_lines(lines: &[SemifinishedIngredient]) -> DomainResult<()> {
    for line in lines {
        validate::positive("ingredients.weight", line.weight)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSemifinished {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default = "default_output_quantity")]
    pub output_quantity: f64,
    #[serde(default)]
    pub ingredients: Vec<SemifinishedIngredient>,
}

impl NewSemifinished {
    pub fn validate(&self) -> DomainResult<()> {
        validate::name("name", &self.name)?;
        validate::optional_text("category", self.category.as_deref(), validate::CATEGORY_MAX)?;
        validate::positive("output_quantity", self.output_quantity)?;
        validate_lines(&self.ingredients)
    }

    pub(crate) fn into_semifinished(self, id: SemifinishedId, now: DateTime<Utc>) -> Semifinished {
        Semifinished {
            id,
            name: self.name,
            category: self.category,
            unit: self.unit,
            output_quantity: self.output_quantity,
            ingredients: self.ingredients,
            created_at: Some(now),
            updated_at: None,
        }
    }
}

/// Partial update. A present `ingredients` list replaces the whole composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemifinishedPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub output_quantity: Option<f64>,
    #[serde(default)]
    pub ingredients: Option<Vec<SemifinishedIngredient>>,
}

impl SemifinishedPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate::name("name", name)?;
        }
        validate::optional_text("category", self.category.as_deref(), validate::CATEGORY_MAX)?;
        if let Some(output) = self.output_quantity {
            validate::positive("output_quantity", output)?;
        }
        match &self.ingredients {
            Some(lines) => validate_lines(lines),
            None => Ok(()),
        }
    }

    pub(crate) fn apply_to(self, item: &mut Semifinished, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = Some(category);
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(output) = self.output_quantity {
            item.output_quantity = output;
        }
        if let Some(lines) = self.ingredients {
            item.ingredients = lines;
        }
        item.updated_at = Some(now);
    }
}

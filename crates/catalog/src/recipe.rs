//! Recipes (technical cards): sellable dishes and drinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use menucost_core::{
    DomainResult, Entity, IngredientId, RecipeId, SemifinishedId, ValueObject,
};

use crate::validate;

fn default_true() -> bool {
    true
}

/// Ingredient line of a recipe.
///
/// Both weights are in grams. Only `net_weight` (what ends up in the dish)
/// is costed; `gross_weight` is the pre-trim amount kept for the kitchen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: IngredientId,
    pub gross_weight: f64,
    pub net_weight: f64,
    #[serde(default)]
    pub cooking_method: Option<String>,
    #[serde(default)]
    pub is_cleaned: bool,
}

impl ValueObject for RecipeIngredient {}

/// Semifinished line of a recipe, quantity in grams/mL of the prepared batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSemifinished {
    pub semifinished_id: SemifinishedId,
    pub quantity: f64,
}

impl ValueObject for RecipeSemifinished {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Yield of the finished dish in grams/mL.
    #[serde(default)]
    pub output_weight: f64,
    /// Sale price.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_weight_based: bool,
    #[serde(default)]
    pub exclude_from_discounts: bool,
    #[serde(default = "default_true")]
    pub show_in_pos: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub semifinished_items: Vec<RecipeSemifinished>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn references_ingredient(&self, id: &IngredientId) -> bool {
        self.ingredients.iter().any(|line| &line.ingredient_id == id)
    }

    pub fn references_semifinished(&self, id: &SemifinishedId) -> bool {
        self.semifinished_items
            .iter()
            .any(|line| &line.semifinished_id == id)
    }
}

impl Entity for Recipe {
    type Id = RecipeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn validate_ingredient_lines(lines: &[RecipeIngredient]) -> DomainResult<()> {
    for line in lines {
        validate::positive("ingredients.gross_weight", line.gross_weight)?;
        validate::positive("ingredients.net_weight", line.net_weight)?;
        validate::optional_text(
            "ingredients.cooking_method",
            line.cooking_method.as_deref(),
            validate::COOKING_METHOD_MAX,
        )?;
    }
    Ok(())
}

fn validate_semifinished_lines(lines: &[RecipeSemifinished]) -> DomainResult<()> {
    for line in lines {
        validate::positive("semifinished.quantity", line.quantity)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub output_weight: f64,
    pub price: f64,
    #[serde(default)]
    pub is_weight_based: bool,
    #[serde(default)]
    pub exclude_from_discounts: bool,
    #[serde(default = "default_true")]
    pub show_in_pos: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub semifinished: Vec<RecipeSemifinished>,
}

impl NewRecipe {
    pub fn validate(&self) -> DomainResult<()> {
        validate::name("name", &self.name)?;
        validate::optional_text("category", self.category.as_deref(), validate::CATEGORY_MAX)?;
        validate::non_negative("output_weight", self.output_weight)?;
        validate::non_negative("price", self.price)?;
        validate::optional_text("image_url", self.image_url.as_deref(), validate::IMAGE_URL_MAX)?;
        validate_ingredient_lines(&self.ingredients)?;
        validate_semifinished_lines(&self.semifinished)
    }

    pub(crate) fn into_recipe(self, id: RecipeId, now: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            name: self.name,
            category: self.category,
            output_weight: self.output_weight,
            price: self.price,
            is_weight_based: self.is_weight_based,
            exclude_from_discounts: self.exclude_from_discounts,
            show_in_pos: self.show_in_pos,
            image_url: self.image_url,
            ingredients: self.ingredients,
            semifinished_items: self.semifinished,
            created_at: Some(now),
            updated_at: None,
        }
    }
}

/// Partial update. Present composition lists replace the old lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub output_weight: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_weight_based: Option<bool>,
    #[serde(default)]
    pub exclude_from_discounts: Option<bool>,
    #[serde(default)]
    pub show_in_pos: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<RecipeIngredient>>,
    #[serde(default)]
    pub semifinished: Option<Vec<RecipeSemifinished>>,
}

impl RecipePatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            validate::name("name", name)?;
        }
        validate::optional_text("category", self.category.as_deref(), validate::CATEGORY_MAX)?;
        if let Some(weight) = self.output_weight {
            validate::non_negative("output_weight", weight)?;
        }
        if let Some(price) = self.price {
            validate::non_negative("price", price)?;
        }
        validate::optional_text("image_url", self.image_url.as_deref(), validate::IMAGE_URL_MAX)?;
        if let Some(lines) = &self.ingredients {
            validate_ingredient_lines(lines)?;
        }
        if let Some(lines) = &self.semifinished {
            validate_semifinished_lines(lines)?;
        }
        Ok(())
    }

    pub(crate) fn apply_to(self, recipe: &mut Recipe, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(category) = self.category {
            recipe.category = Some(category);
        }
        if let Some(weight) = self.output_weight {
            recipe.output_weight = weight;
        }
        if let Some(price) = self.price {
            recipe.price = price;
        }
        if let Some(flag) = self.is_weight_based {
            recipe.is_weight_based = flag;
        }
        if let Some(flag) = self.exclude_from_discounts {
            recipe.exclude_from_discounts = flag;
        }
        if let Some(flag) = self.show_in_pos {
            recipe.show_in_pos = flag;
        }
        if let Some(url) = self.image_url {
            recipe.image_url = Some(url);
        }
        if let Some(lines) = self.ingredients {
            recipe.ingredients = lines;
        }
        if let Some(lines) = self.semifinished {
            recipe.semifinished_items = lines;
        }
        recipe.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte() -> NewRecipe {
        NewRecipe {
            name: "Latte".to_string(),
            category: Some("Coffee".to_string()),
            output_weight: 350.0,
            price: 1200.0,
            is_weight_based: false,
            exclude_from_discounts: false,
            show_in_pos: true,
            image_url: None,
            ingredients: vec![RecipeIngredient {
                ingredient_id: IngredientId::new(),
                gross_weight: 350.0,
                net_weight: 350.0,
                cooking_method: Some("steamed".to_string()),
                is_cleaned: false,
            }],
            semifinished: vec![],
        }
    }

    #[test]
    fn valid_recipe_passes() {
        assert!(latte().validate().is_ok());
    }

    #[test]
    fn zero_net_weight_is_rejected() {
        let mut input = latte();
        input.ingredients[0].net_weight = 0.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn free_items_are_allowed() {
        let mut input = latte();
        input.price = 0.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn show_in_pos_defaults_to_true_in_snapshots() {
        let json = format!(r#"{{"id":"{}","name":"Water"}}"#, RecipeId::new());
        let recipe: Recipe = serde_json::from_str(&json).unwrap();
        assert!(recipe.show_in_pos);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.price, 0.0);
    }

    #[test]
    fn patch_keeps_untouched_composition() {
        let mut recipe = latte().into_recipe(RecipeId::new(), Utc::now());
        let before = recipe.ingredients.clone();
        RecipePatch {
            price: Some(1300.0),
            ..RecipePatch::default()
        }
        .apply_to(&mut recipe, Utc::now());
        assert_eq!(recipe.price, 1300.0);
        assert_eq!(recipe.ingredients, before);
    }
}

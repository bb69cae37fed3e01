//! Cost sheets and the POS listing.
//!
//! These are the display shapes catalog screens and the till need: headline
//! figures plus a per-line breakdown. Every number comes from [`crate::engine`],
//! so a sheet always agrees with the engine. Lines whose constituent cannot be
//! resolved are left out of the breakdown (they contribute nothing anyway).

use serde::Serialize;

use menucost_catalog::{CatalogLookup, Recipe, Semifinished, Unit};
use menucost_core::{IngredientId, RecipeId, SemifinishedId};

use crate::engine::{self, RecipeFigures};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemifinishedLineCost {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub ingredient_unit: Unit,
    pub weight: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemifinishedCostSheet {
    pub id: SemifinishedId,
    pub name: String,
    pub category: Option<String>,
    pub unit: Unit,
    pub output_quantity: f64,
    pub cost: f64,
    pub cost_per_gram: f64,
    pub ingredients: Vec<SemifinishedLineCost>,
}

impl SemifinishedCostSheet {
    pub fn build<L>(semifinished: &Semifinished, lookup: &L) -> Self
    where
        L: CatalogLookup + ?Sized,
    {
        let ingredients = semifinished
            .ingredients
            .iter()
            .filter_map(|line| {
                let ingredient = lookup.ingredient(&line.ingredient_id)?;
                Some(SemifinishedLineCost {
                    ingredient_id: line.ingredient_id,
                    ingredient_name: ingredient.name.clone(),
                    ingredient_unit: ingredient.unit,
                    weight: line.weight,
                    cost: engine::ingredient_unit_cost(Some(ingredient), line.weight),
                })
            })
            .collect();

        Self {
            id: semifinished.id,
            name: semifinished.name.clone(),
            category: semifinished.category.clone(),
            unit: semifinished.unit,
            output_quantity: semifinished.output_quantity,
            cost: engine::semifinished_cost(semifinished, lookup),
            cost_per_gram: engine::cost_per_gram(semifinished, lookup),
            ingredients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredientLineCost {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub ingredient_unit: Unit,
    pub gross_weight: f64,
    pub net_weight: f64,
    pub cooking_method: Option<String>,
    pub is_cleaned: bool,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSemifinishedLineCost {
    pub semifinished_id: SemifinishedId,
    pub semifinished_name: String,
    pub semifinished_unit: Unit,
    pub quantity: f64,
    pub cost: f64,
}

/// Full technical card of a recipe with costs per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCostSheet {
    pub id: RecipeId,
    pub name: String,
    pub category: Option<String>,
    pub output_weight: f64,
    pub price: f64,
    pub is_weight_based: bool,
    pub exclude_from_discounts: bool,
    pub show_in_pos: bool,
    pub image_url: Option<String>,
    pub cost: f64,
    pub markup_percentage: f64,
    pub profit: f64,
    pub ingredients: Vec<RecipeIngredientLineCost>,
    pub semifinished: Vec<RecipeSemifinishedLineCost>,
}

impl RecipeCostSheet {
    pub fn build<L>(recipe: &Recipe, lookup: &L) -> Self
    where
        L: CatalogLookup + ?Sized,
    {
        let figures = RecipeFigures::compute(recipe, lookup);

        let ingredients = recipe
            .ingredients
            .iter()
            .filter_map(|line| {
                let ingredient = lookup.ingredient(&line.ingredient_id)?;
                Some(RecipeIngredientLineCost {
                    ingredient_id: line.ingredient_id,
                    ingredient_name: ingredient.name.clone(),
                    ingredient_unit: ingredient.unit,
                    gross_weight: line.gross_weight,
                    net_weight: line.net_weight,
                    cooking_method: line.cooking_method.clone(),
                    is_cleaned: line.is_cleaned,
                    cost: engine::recipe_ingredient_line_cost(line, lookup),
                })
            })
            .collect();

        let semifinished = recipe
            .semifinished_items
            .iter()
            .filter_map(|line| {
                let item = lookup.semifinished(&line.semifinished_id)?;
                Some(RecipeSemifinishedLineCost {
                    semifinished_id: line.semifinished_id,
                    semifinished_name: item.name.clone(),
                    semifinished_unit: item.unit,
                    quantity: line.quantity,
                    cost: engine::recipe_semifinished_line_cost(line, lookup),
                })
            })
            .collect();

        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            output_weight: recipe.output_weight,
            price: recipe.price,
            is_weight_based: recipe.is_weight_based,
            exclude_from_discounts: recipe.exclude_from_discounts,
            show_in_pos: recipe.show_in_pos,
            image_url: recipe.image_url.clone(),
            cost: figures.cost,
            markup_percentage: figures.markup_percentage,
            profit: figures.profit,
            ingredients,
            semifinished,
        }
    }
}

/// One row of the point-of-sale menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeListing {
    pub id: RecipeId,
    pub name: String,
    pub category: Option<String>,
    pub output_weight: f64,
    pub price: f64,
    pub cost: f64,
    pub markup_percentage: f64,
    pub profit: f64,
    pub is_weight_based: bool,
    pub exclude_from_discounts: bool,
    pub image_url: Option<String>,
}

impl RecipeListing {
    pub fn build<L>(recipe: &Recipe, lookup: &L) -> Self
    where
        L: CatalogLookup + ?Sized,
    {
        let figures = RecipeFigures::compute(recipe, lookup);
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            category: recipe.category.clone(),
            output_weight: recipe.output_weight,
            price: recipe.price,
            cost: figures.cost,
            markup_percentage: figures.markup_percentage,
            profit: figures.profit,
            is_weight_based: recipe.is_weight_based,
            exclude_from_discounts: recipe.exclude_from_discounts,
            image_url: recipe.image_url.clone(),
        }
    }
}

/// Listing rows for every recipe shown at the till, ordered by name.
pub fn pos_listing<'a, L>(
    recipes: impl IntoIterator<Item = &'a Recipe>,
    lookup: &L,
) -> Vec<RecipeListing>
where
    L: CatalogLookup + ?Sized,
{
    let mut rows: Vec<RecipeListing> = recipes
        .into_iter()
        .filter(|recipe| recipe.show_in_pos)
        .map(|recipe| RecipeListing::build(recipe, lookup))
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    rows
}

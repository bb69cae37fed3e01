//! Cost engine: derived cost, markup and profit of catalog items.
//!
//! Every function here is pure over a loaded snapshot. Missing references and
//! zero divisors degrade to `0.0`; nothing in this module returns an error.
//! There is no caching: callers recompute after any composition or price edit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use menucost_catalog::{
    CatalogLookup, Ingredient, Recipe, RecipeIngredient, RecipeSemifinished, Semifinished,
    SemifinishedIngredient,
};

use crate::money::round2;

/// Cost of `quantity_in_grams` of an ingredient, rounded to 2 decimals.
///
/// Kilogram- and liter-priced ingredients are converted from grams; gram,
/// millilitre and piece-priced ones use the stored figure as-is. An absent
/// ingredient costs nothing.
pub fn ingredient_unit_cost(ingredient: Option<&Ingredient>, quantity_in_grams: f64) -> f64 {
    match ingredient {
        Some(ingredient) => {
            round2(ingredient.unit.from_grams(quantity_in_grams) * ingredient.purchase_price)
        }
        None => 0.0,
    }
}

pub fn semifinished_ingredient_line_cost<L>(line: &SemifinishedIngredient, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    let ingredient = lookup.ingredient(&line.ingredient_id);
    if ingredient.is_none() {
        debug!(ingredient_id = %line.ingredient_id, "unresolved ingredient in semifinished; costed as 0");
    }
    ingredient_unit_cost(ingredient, line.weight)
}

/// Cost of one full batch: sum of the (rounded) line costs.
pub fn semifinished_cost<L>(semifinished: &Semifinished, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    semifinished
        .ingredients
        .iter()
        .map(|line| semifinished_ingredient_line_cost(line, lookup))
        .fold(0.0, |acc, cost| acc + cost)
}

/// Batch cost spread over the batch yield. Zero yield gives zero.
pub fn cost_per_gram<L>(semifinished: &Semifinished, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    if semifinished.output_quantity == 0.0 {
        debug!(semifinished_id = %semifinished.id, "semifinished has zero output; cost per gram is 0");
        return 0.0;
    }
    semifinished_cost(semifinished, lookup) / semifinished.output_quantity
}

/// Net-weight cost of a recipe ingredient line. Gross weight is ignored.
pub fn recipe_ingredient_line_cost<L>(line: &RecipeIngredient, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    let ingredient = lookup.ingredient(&line.ingredient_id);
    if ingredient.is_none() {
        debug!(ingredient_id = %line.ingredient_id, "unresolved ingredient in recipe; costed as 0");
    }
    ingredient_unit_cost(ingredient, line.net_weight)
}

/// `quantity × cost_per_gram`, rounded to 2 decimals.
pub fn recipe_semifinished_line_cost<L>(line: &RecipeSemifinished, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    match lookup.semifinished(&line.semifinished_id) {
        Some(semifinished) => round2(line.quantity * cost_per_gram(semifinished, lookup)),
        None => {
            debug!(semifinished_id = %line.semifinished_id, "unresolved semifinished in recipe; costed as 0");
            0.0
        }
    }
}

pub fn recipe_cost<L>(recipe: &Recipe, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    let ingredients_cost = recipe
        .ingredients
        .iter()
        .map(|line| recipe_ingredient_line_cost(line, lookup))
        .fold(0.0, |acc, cost| acc + cost);
    let semifinished_cost_total = recipe
        .semifinished_items
        .iter()
        .map(|line| recipe_semifinished_line_cost(line, lookup))
        .fold(0.0, |acc, cost| acc + cost);
    ingredients_cost + semifinished_cost_total
}

/// `(price − cost) / cost × 100`, rounded; 0 when there is no cost to mark up.
pub fn markup_for(price: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    round2((price - cost) / cost * 100.0)
}

pub fn profit_for(price: f64, cost: f64) -> f64 {
    price - cost
}

pub fn markup_percentage<L>(recipe: &Recipe, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    markup_for(recipe.price, recipe_cost(recipe, lookup))
}

pub fn profit<L>(recipe: &Recipe, lookup: &L) -> f64
where
    L: CatalogLookup + ?Sized,
{
    profit_for(recipe.price, recipe_cost(recipe, lookup))
}

/// The three derived recipe figures, computed from a single cost pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeFigures {
    pub cost: f64,
    pub markup_percentage: f64,
    pub profit: f64,
}

impl RecipeFigures {
    pub fn compute<L>(recipe: &Recipe, lookup: &L) -> Self
    where
        L: CatalogLookup + ?Sized,
    {
        let cost = recipe_cost(recipe, lookup);
        Self {
            cost,
            markup_percentage: markup_for(recipe.price, cost),
            profit: profit_for(recipe.price, cost),
        }
    }
}

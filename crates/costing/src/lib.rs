//! Recipe cost engine.
//!
//! Computes the cost of ingredients, semifinished batches and recipes, plus
//! recipe markup and profit, from a catalog snapshot. Pure and deterministic;
//! incomplete data costs zero instead of failing.

pub mod engine;
pub mod money;
pub mod sheet;

pub use engine::{
    cost_per_gram, ingredient_unit_cost, markup_for, markup_percentage, profit, profit_for,
    recipe_cost, recipe_ingredient_line_cost, recipe_semifinished_line_cost, semifinished_cost,
    semifinished_ingredient_line_cost, RecipeFigures,
};
pub use money::round2;
pub use sheet::{
    pos_listing, RecipeCostSheet, RecipeIngredientLineCost, RecipeListing,
    RecipeSemifinishedLineCost, SemifinishedCostSheet, SemifinishedLineCost,
};

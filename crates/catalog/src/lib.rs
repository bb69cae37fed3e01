//! Catalog domain module: ingredients, semifinished items and recipes.
//!
//! Records here are plain snapshot structs. Composition lines are owned by
//! their container and refer to shared constituents by id; [`CatalogLookup`]
//! is the seam the cost engine resolves those ids through.

pub mod catalog;
pub mod ingredient;
pub mod lookup;
pub mod recipe;
pub mod semifinished;
pub mod unit;

mod validate;

pub use catalog::{Catalog, CatalogSnapshot, ListQuery, DEFAULT_LIMIT};
pub use ingredient::{Ingredient, IngredientPatch, NewIngredient, StockAdjustment};
pub use lookup::CatalogLookup;
pub use recipe::{NewRecipe, Recipe, RecipeIngredient, RecipePatch, RecipeSemifinished};
pub use semifinished::{NewSemifinished, Semifinished, SemifinishedIngredient, SemifinishedPatch};
pub use unit::Unit;

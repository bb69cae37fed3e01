//! In-memory catalog snapshot.
//!
//! Holds every ingredient, semifinished item and recipe by id, enforces
//! reference integrity on edits, and serves as the [`CatalogLookup`] the cost
//! engine reads from. Snapshots loaded from disk are *not* rejected for
//! dangling references: costing degrades those lines to zero instead.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use menucost_core::{DomainError, DomainResult, Entity, IngredientId, RecipeId, SemifinishedId};

use crate::ingredient::{Ingredient, IngredientPatch, NewIngredient, StockAdjustment};
use crate::lookup::CatalogLookup;
use crate::recipe::{NewRecipe, Recipe, RecipePatch};
use crate::semifinished::{NewSemifinished, Semifinished, SemifinishedPatch};

/// Default page size for listings.
pub const DEFAULT_LIMIT: usize = 100;

/// Listing filter: optional exact category match plus offset pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category: None,
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    fn matches(&self, category: Option<&str>) -> bool {
        match &self.category {
            Some(wanted) => category == Some(wanted.as_str()),
            None => true,
        }
    }

    fn page<'a, T>(&self, items: Vec<&'a T>) -> Vec<&'a T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// Serializable form of the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub semifinished: Vec<Semifinished>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl CatalogSnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ingredients: HashMap<IngredientId, Ingredient>,
    semifinished: HashMap<SemifinishedId, Semifinished>,
    recipes: HashMap<RecipeId, Recipe>,
}

fn sorted_by_name<'a, T>(items: impl Iterator<Item = &'a T>) -> Vec<&'a T>
where
    T: Entity + 'a,
    T::Id: Ord,
{
    let mut items: Vec<&T> = items.collect();
    items.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
    items
}

fn distinct_categories<'a>(categories: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    categories
        .flatten()
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn ensure_unique_name<'a, T>(
    kind: &str,
    existing: impl Iterator<Item = &'a T>,
    name: &str,
    except: Option<&T::Id>,
) -> DomainResult<()>
where
    T: Entity + 'a,
{
    let clash = existing
        .filter(|item| Some(item.id()) != except)
        .any(|item| item.name() == name);
    if clash {
        return Err(DomainError::conflict(format!("{kind} '{name}' already exists")));
    }
    Ok(())
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a snapshot. Duplicate ids are rejected; dangling
    /// composition references are kept and logged.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> DomainResult<Self> {
        let mut catalog = Self::new();
        for ingredient in snapshot.ingredients {
            let id = ingredient.id;
            if catalog.ingredients.insert(id, ingredient).is_some() {
                return Err(DomainError::conflict(format!("duplicate ingredient id {id}")));
            }
        }
        for item in snapshot.semifinished {
            let id = item.id;
            if catalog.semifinished.insert(id, item).is_some() {
                return Err(DomainError::conflict(format!("duplicate semifinished id {id}")));
            }
        }
        for recipe in snapshot.recipes {
            let id = recipe.id;
            if catalog.recipes.insert(id, recipe).is_some() {
                return Err(DomainError::conflict(format!("duplicate recipe id {id}")));
            }
        }

        let dangling = catalog.dangling_references();
        if dangling > 0 {
            warn!(dangling, "catalog snapshot has unresolved composition references");
        }
        Ok(catalog)
    }

    /// Snapshot of the current state, each list ordered by name.
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            ingredients: sorted_by_name(self.ingredients.values())
                .into_iter()
                .cloned()
                .collect(),
            semifinished: sorted_by_name(self.semifinished.values())
                .into_iter()
                .cloned()
                .collect(),
            recipes: sorted_by_name(self.recipes.values())
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Number of composition lines pointing at records that do not exist.
    pub fn dangling_references(&self) -> usize {
        let from_semifinished = self
            .semifinished
            .values()
            .flat_map(|item| item.ingredients.iter())
            .filter(|line| !self.ingredients.contains_key(&line.ingredient_id))
            .count();
        let from_recipe_ingredients = self
            .recipes
            .values()
            .flat_map(|recipe| recipe.ingredients.iter())
            .filter(|line| !self.ingredients.contains_key(&line.ingredient_id))
            .count();
        let from_recipe_semifinished = self
            .recipes
            .values()
            .flat_map(|recipe| recipe.semifinished_items.iter())
            .filter(|line| !self.semifinished.contains_key(&line.semifinished_id))
            .count();
        from_semifinished + from_recipe_ingredients + from_recipe_semifinished
    }

    fn ensure_ingredients_exist<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a IngredientId>,
    ) -> DomainResult<()> {
        for id in ids {
            if !self.ingredients.contains_key(id) {
                return Err(DomainError::not_found(format!("ingredient {id}")));
            }
        }
        Ok(())
    }

    fn ensure_semifinished_exist<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a SemifinishedId>,
    ) -> DomainResult<()> {
        for id in ids {
            if !self.semifinished.contains_key(id) {
                return Err(DomainError::not_found(format!("semifinished {id}")));
            }
        }
        Ok(())
    }

    // --- ingredients -------------------------------------------------------

    pub fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    pub fn ingredients(&self, query: &ListQuery) -> Vec<&Ingredient> {
        let matching = self
            .ingredients
            .values()
            .filter(|i| query.matches(i.category.as_deref()));
        query.page(sorted_by_name(matching))
    }

    pub fn low_stock_ingredients(&self) -> Vec<&Ingredient> {
        sorted_by_name(self.ingredients.values().filter(|i| i.is_low_stock()))
    }

    pub fn ingredient_categories(&self) -> Vec<String> {
        distinct_categories(self.ingredients.values().map(|i| i.category.as_deref()))
    }

    pub fn add_ingredient(
        &mut self,
        id: IngredientId,
        input: NewIngredient,
        now: DateTime<Utc>,
    ) -> DomainResult<&Ingredient> {
        input.validate()?;
        if self.ingredients.contains_key(&id) {
            return Err(DomainError::conflict(format!("ingredient {id} already exists")));
        }
        ensure_unique_name("ingredient", self.ingredients.values(), &input.name, None)?;

        info!(ingredient_id = %id, name = %input.name, unit = %input.unit, "ingredient added");
        let ingredient = input.into_ingredient(id, now);
        Ok(self.ingredients.entry(id).or_insert(ingredient))
    }

    /// Update catalog fields. A price change silently changes the cost of
    /// every recipe in [`Catalog::recipes_affected_by_ingredient`].
    pub fn update_ingredient(
        &mut self,
        id: &IngredientId,
        patch: IngredientPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<&Ingredient> {
        if !self.ingredients.contains_key(id) {
            return Err(DomainError::not_found(format!("ingredient {id}")));
        }
        patch.validate()?;
        if let Some(name) = &patch.name {
            ensure_unique_name("ingredient", self.ingredients.values(), name, Some(id))?;
        }

        let ingredient = self
            .ingredients
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("ingredient {id}")))?;
        patch.apply_to(ingredient, now);
        info!(ingredient_id = %id, "ingredient updated");
        Ok(ingredient)
    }

    pub fn adjust_stock(
        &mut self,
        id: &IngredientId,
        adjustment: StockAdjustment,
        now: DateTime<Utc>,
    ) -> DomainResult<&Ingredient> {
        let ingredient = self
            .ingredients
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("ingredient {id}")))?;
        let next = adjustment.resulting_stock(ingredient)?;
        ingredient.stock_quantity = next;
        ingredient.updated_at = Some(now);
        info!(
            ingredient_id = %id,
            delta = adjustment.quantity,
            stock = next,
            reason = adjustment.reason.as_deref().unwrap_or(""),
            "ingredient stock adjusted"
        );
        Ok(ingredient)
    }

    /// Remove an ingredient that no composition line uses any more.
    pub fn remove_ingredient(&mut self, id: &IngredientId) -> DomainResult<Ingredient> {
        if !self.ingredients.contains_key(id) {
            return Err(DomainError::not_found(format!("ingredient {id}")));
        }
        if let Some(item) = self.semifinished.values().find(|s| s.references_ingredient(id)) {
            return Err(DomainError::conflict(format!(
                "ingredient {id} is used by semifinished '{}'",
                item.name
            )));
        }
        if let Some(recipe) = self.recipes.values().find(|r| r.references_ingredient(id)) {
            return Err(DomainError::conflict(format!(
                "ingredient {id} is used by recipe '{}'",
                recipe.name
            )));
        }

        info!(ingredient_id = %id, "ingredient removed");
        self.ingredients
            .remove(id)
            .ok_or_else(|| DomainError::not_found(format!("ingredient {id}")))
    }

    // --- semifinished ------------------------------------------------------

    pub fn semifinished(&self, id: &SemifinishedId) -> Option<&Semifinished> {
        self.semifinished.get(id)
    }

    pub fn semifinished_items(&self, query: &ListQuery) -> Vec<&Semifinished> {
        let matching = self
            .semifinished
            .values()
            .filter(|s| query.matches(s.category.as_deref()));
        query.page(sorted_by_name(matching))
    }

    pub fn semifinished_categories(&self) -> Vec<String> {
        distinct_categories(self.semifinished.values().map(|s| s.category.as_deref()))
    }

    pub fn add_semifinished(
        &mut self,
        id: SemifinishedId,
        input: NewSemifinished,
        now: DateTime<Utc>,
    ) -> DomainResult<&Semifinished> {
        input.validate()?;
        if self.semifinished.contains_key(&id) {
            return Err(DomainError::conflict(format!("semifinished {id} already exists")));
        }
        ensure_unique_name("semifinished", self.semifinished.values(), &input.name, None)?;
        self.ensure_ingredients_exist(input.ingredients.iter().map(|l| &l.ingredient_id))?;

        info!(
            semifinished_id = %id,
            name = %input.name,
            lines = input.ingredients.len(),
            "semifinished added"
        );
        let item = input.into_semifinished(id, now);
        Ok(self.semifinished.entry(id).or_insert(item))
    }

    pub fn update_semifinished(
        &mut self,
        id: &SemifinishedId,
        patch: SemifinishedPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<&Semifinished> {
        if !self.semifinished.contains_key(id) {
            return Err(DomainError::not_found(format!("semifinished {id}")));
        }
        patch.validate()?;
        if let Some(name) = &patch.name {
            ensure_unique_name("semifinished", self.semifinished.values(), name, Some(id))?;
        }
        if let Some(lines) = &patch.ingredients {
            self.ensure_ingredients_exist(lines.iter().map(|l| &l.ingredient_id))?;
        }

        let item = self
            .semifinished
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("semifinished {id}")))?;
        patch.apply_to(item, now);
        info!(semifinished_id = %id, "semifinished updated");
        Ok(item)
    }

    pub fn remove_semifinished(&mut self, id: &SemifinishedId) -> DomainResult<Semifinished> {
        if !self.semifinished.contains_key(id) {
            return Err(DomainError::not_found(format!("semifinished {id}")));
        }
        if let Some(recipe) = self.recipes.values().find(|r| r.references_semifinished(id)) {
            return Err(DomainError::conflict(format!(
                "semifinished {id} is used by recipe '{}'",
                recipe.name
            )));
        }

        info!(semifinished_id = %id, "semifinished removed");
        self.semifinished
            .remove(id)
            .ok_or_else(|| DomainError::not_found(format!("semifinished {id}")))
    }

    // --- recipes -----------------------------------------------------------

    pub fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn recipes(&self, query: &ListQuery) -> Vec<&Recipe> {
        let matching = self
            .recipes
            .values()
            .filter(|r| query.matches(r.category.as_deref()));
        query.page(sorted_by_name(matching))
    }

    pub fn recipe_categories(&self) -> Vec<String> {
        distinct_categories(self.recipes.values().map(|r| r.category.as_deref()))
    }

    pub fn add_recipe(
        &mut self,
        id: RecipeId,
        input: NewRecipe,
        now: DateTime<Utc>,
    ) -> DomainResult<&Recipe> {
        input.validate()?;
        if self.recipes.contains_key(&id) {
            return Err(DomainError::conflict(format!("recipe {id} already exists")));
        }
        ensure_unique_name("recipe", self.recipes.values(), &input.name, None)?;
        self.ensure_ingredients_exist(input.ingredients.iter().map(|l| &l.ingredient_id))?;
        self.ensure_semifinished_exist(input.semifinished.iter().map(|l| &l.semifinished_id))?;

        info!(
            recipe_id = %id,
            name = %input.name,
            ingredient_lines = input.ingredients.len(),
            semifinished_lines = input.semifinished.len(),
            "recipe added"
        );
        let recipe = input.into_recipe(id, now);
        Ok(self.recipes.entry(id).or_insert(recipe))
    }

    pub fn update_recipe(
        &mut self,
        id: &RecipeId,
        patch: RecipePatch,
        now: DateTime<Utc>,
    ) -> DomainResult<&Recipe> {
        if !self.recipes.contains_key(id) {
            return Err(DomainError::not_found(format!("recipe {id}")));
        }
        patch.validate()?;
        if let Some(name) = &patch.name {
            ensure_unique_name("recipe", self.recipes.values(), name, Some(id))?;
        }
        if let Some(lines) = &patch.ingredients {
            self.ensure_ingredients_exist(lines.iter().map(|l| &l.ingredient_id))?;
        }
        if let Some(lines) = &patch.semifinished {
            self.ensure_semifinished_exist(lines.iter().map(|l| &l.semifinished_id))?;
        }

        let recipe = self
            .recipes
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("recipe {id}")))?;
        patch.apply_to(recipe, now);
        info!(recipe_id = %id, "recipe updated");
        Ok(recipe)
    }

    /// Remove a recipe together with its composition lines.
    pub fn remove_recipe(&mut self, id: &RecipeId) -> DomainResult<Recipe> {
        let recipe = self
            .recipes
            .remove(id)
            .ok_or_else(|| DomainError::not_found(format!("recipe {id}")))?;
        info!(recipe_id = %id, "recipe removed");
        Ok(recipe)
    }

    /// Recipes whose cost depends on `id`, directly or through a semifinished item.
    pub fn recipes_affected_by_ingredient(&self, id: &IngredientId) -> Vec<&Recipe> {
        let via: HashSet<SemifinishedId> = self
            .semifinished
            .values()
            .filter(|s| s.references_ingredient(id))
            .map(|s| s.id)
            .collect();
        sorted_by_name(self.recipes.values().filter(|r| {
            r.references_ingredient(id)
                || r.semifinished_items
                    .iter()
                    .any(|line| via.contains(&line.semifinished_id))
        }))
    }
}

impl CatalogLookup for Catalog {
    fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    fn semifinished(&self, id: &SemifinishedId) -> Option<&Semifinished> {
        self.semifinished.get(id)
    }
}

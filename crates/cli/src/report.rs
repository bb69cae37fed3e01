//! Report shapes printed by the command line.
//!
//! Every figure comes from `menucost-costing`; this module only selects records
//! and attaches the business header.

use serde::Serialize;

use menucost_catalog::{Catalog, ListQuery, Unit};
use menucost_core::{DomainError, DomainResult, IngredientId, RecipeId, SemifinishedId};
use menucost_costing::{
    pos_listing, round2, RecipeCostSheet, RecipeListing, SemifinishedCostSheet,
};

use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub business_name: String,
    pub phone: Option<String>,
}

impl From<&Settings> for Header {
    fn from(settings: &Settings) -> Self {
        Self {
            business_name: settings.business_name.clone(),
            phone: settings.phone.clone(),
        }
    }
}

/// The till menu with figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuReport {
    pub header: Header,
    pub items: Vec<RecipeListing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockLine {
    pub id: IngredientId,
    pub name: String,
    pub category: Option<String>,
    pub unit: Unit,
    pub stock_quantity: f64,
    pub min_stock: f64,
    pub stock_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    pub header: Header,
    pub items: Vec<StockLine>,
    pub total_value: f64,
}

/// Recipes whose figures move when an ingredient price changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub recipes: Vec<RecipeListing>,
}

pub fn recipe_sheet(catalog: &Catalog, id: &RecipeId) -> DomainResult<RecipeCostSheet> {
    let recipe = catalog
        .recipe(id)
        .ok_or_else(|| DomainError::not_found(format!("recipe {id}")))?;
    Ok(RecipeCostSheet::build(recipe, catalog))
}

pub fn semifinished_sheet(
    catalog: &Catalog,
    id: &SemifinishedId,
) -> DomainResult<SemifinishedCostSheet> {
    let item = catalog
        .semifinished(id)
        .ok_or_else(|| DomainError::not_found(format!("semifinished {id}")))?;
    Ok(SemifinishedCostSheet::build(item, catalog))
}

pub fn menu(catalog: &Catalog, settings: &Settings, category: Option<String>) -> MenuReport {
    let query = ListQuery {
        category,
        skip: 0,
        limit: usize::MAX,
    };
    MenuReport {
        header: settings.into(),
        items: pos_listing(catalog.recipes(&query), catalog),
    }
}

pub fn low_stock(catalog: &Catalog, settings: &Settings) -> StockReport {
    let items: Vec<StockLine> = catalog
        .low_stock_ingredients()
        .into_iter()
        .map(|i| StockLine {
            id: i.id,
            name: i.name.clone(),
            category: i.category.clone(),
            unit: i.unit,
            stock_quantity: i.stock_quantity,
            min_stock: i.min_stock,
            stock_value: round2(i.stock_value()),
        })
        .collect();
    let total_value = round2(items.iter().fold(0.0, |acc, line| acc + line.stock_value));

    StockReport {
        header: settings.into(),
        items,
        total_value,
    }
}

pub fn impact(catalog: &Catalog, id: &IngredientId) -> DomainResult<ImpactReport> {
    let ingredient = catalog
        .ingredient(id)
        .ok_or_else(|| DomainError::not_found(format!("ingredient {id}")))?;
    let recipes = catalog
        .recipes_affected_by_ingredient(id)
        .into_iter()
        .map(|recipe| RecipeListing::build(recipe, catalog))
        .collect();

    Ok(ImpactReport {
        ingredient_id: ingredient.id,
        ingredient_name: ingredient.name.clone(),
        recipes,
    })
}

//! End-to-end costing through the catalog API: build a small café menu,
//! price it, then edit it and check the figures follow.

use chrono::Utc;

use menucost_catalog::{
    Catalog, IngredientPatch, NewIngredient, NewRecipe, NewSemifinished, RecipeIngredient,
    RecipePatch, RecipeSemifinished, SemifinishedIngredient, Unit,
};
use menucost_core::{IngredientId, RecipeId, SemifinishedId};
use menucost_costing::{
    cost_per_gram, ingredient_unit_cost, markup_percentage, pos_listing, profit, recipe_cost,
    semifinished_cost, RecipeCostSheet,
};

fn ingredient(name: &str, unit: Unit, price: f64) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        category: None,
        unit,
        purchase_price: price,
        stock_quantity: 0.0,
        min_stock: 0.0,
    }
}

fn recipe(name: &str, price: f64) -> NewRecipe {
    NewRecipe {
        name: name.to_string(),
        category: None,
        output_weight: 350.0,
        price,
        is_weight_based: false,
        exclude_from_discounts: false,
        show_in_pos: true,
        image_url: None,
        ingredients: vec![],
        semifinished: vec![],
    }
}

fn line(ingredient_id: IngredientId, grams: f64) -> RecipeIngredient {
    RecipeIngredient {
        ingredient_id,
        gross_weight: grams,
        net_weight: grams,
        cooking_method: None,
        is_cleaned: false,
    }
}

struct Cafe {
    catalog: Catalog,
    milk: IngredientId,
    tea: IngredientId,
    tea_base: SemifinishedId,
}

/// Milk at 300 per liter; tea leaves at 2000 per kg brewed 50 g into 500 mL of base.
fn cafe() -> Cafe {
    let now = Utc::now();
    let mut catalog = Catalog::new();
    let milk = IngredientId::new();
    let tea = IngredientId::new();
    let tea_base = SemifinishedId::new();

    catalog
        .add_ingredient(milk, ingredient("Milk", Unit::Liter, 300.0), now)
        .unwrap();
    catalog
        .add_ingredient(tea, ingredient("Tea leaves", Unit::Kilogram, 2000.0), now)
        .unwrap();
    catalog
        .add_semifinished(
            tea_base,
            NewSemifinished {
                name: "Tea base".to_string(),
                category: None,
                unit: Unit::Milliliter,
                output_quantity: 500.0,
                ingredients: vec![SemifinishedIngredient {
                    ingredient_id: tea,
                    weight: 50.0,
                }],
            },
            now,
        )
        .unwrap();

    Cafe {
        catalog,
        milk,
        tea,
        tea_base,
    }
}

#[test]
fn milk_by_the_liter() {
    let cafe = cafe();
    let milk = cafe.catalog.ingredient(&cafe.milk);
    assert_eq!(ingredient_unit_cost(milk, 350.0), 105.0);
}

#[test]
fn tea_base_cost_per_gram() {
    let cafe = cafe();
    let base = cafe.catalog.semifinished(&cafe.tea_base).unwrap();
    assert_eq!(semifinished_cost(base, &cafe.catalog), 100.0);
    assert_eq!(cost_per_gram(base, &cafe.catalog), 0.2);
}

#[test]
fn recipe_using_tea_base() {
    let mut cafe = cafe();
    let id = RecipeId::new();
    let mut input = recipe("Iced tea", 600.0);
    input.semifinished = vec![RecipeSemifinished {
        semifinished_id: cafe.tea_base,
        quantity: 200.0,
    }];
    cafe.catalog.add_recipe(id, input, Utc::now()).unwrap();

    let iced_tea = cafe.catalog.recipe(&id).unwrap();
    assert_eq!(recipe_cost(iced_tea, &cafe.catalog), 40.0);
    assert_eq!(profit(iced_tea, &cafe.catalog), 560.0);
    assert_eq!(markup_percentage(iced_tea, &cafe.catalog), 1400.0);
}

#[test]
fn free_item_with_real_cost_has_negative_markup() {
    let mut cafe = cafe();
    let id = RecipeId::new();
    let mut input = recipe("Staff latte", 0.0);
    input.ingredients = vec![line(cafe.milk, 350.0)];
    cafe.catalog.add_recipe(id, input, Utc::now()).unwrap();

    let staff_latte = cafe.catalog.recipe(&id).unwrap();
    let cost = recipe_cost(staff_latte, &cafe.catalog);
    assert_eq!(cost, 105.0);
    assert_eq!(profit(staff_latte, &cafe.catalog), -105.0);
    assert_eq!(markup_percentage(staff_latte, &cafe.catalog), -100.0);
}

#[test]
fn empty_recipe_reports_price_as_profit() {
    let mut cafe = cafe();
    let id = RecipeId::new();
    cafe.catalog
        .add_recipe(id, recipe("Tap water", 150.0), Utc::now())
        .unwrap();

    let water = cafe.catalog.recipe(&id).unwrap();
    assert_eq!(recipe_cost(water, &cafe.catalog), 0.0);
    assert_eq!(markup_percentage(water, &cafe.catalog), 0.0);
    assert_eq!(profit(water, &cafe.catalog), 150.0);
}

#[test]
fn price_change_flows_into_dependent_recipes() {
    let mut cafe = cafe();
    let now = Utc::now();
    let milk_tea = RecipeId::new();
    let mut input = recipe("Milk tea", 800.0);
    input.ingredients = vec![line(cafe.milk, 100.0)];
    input.semifinished = vec![RecipeSemifinished {
        semifinished_id: cafe.tea_base,
        quantity: 200.0,
    }];
    cafe.catalog.add_recipe(milk_tea, input, now).unwrap();

    let before = RecipeCostSheet::build(cafe.catalog.recipe(&milk_tea).unwrap(), &cafe.catalog);
    assert_eq!(before.cost, 70.0);

    let affected: Vec<_> = cafe
        .catalog
        .recipes_affected_by_ingredient(&cafe.tea)
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(affected, vec![milk_tea]);

    // Tea doubles in price: the base goes to 0.4 per gram, the line to 80.
    cafe.catalog
        .update_ingredient(
            &cafe.tea,
            IngredientPatch {
                purchase_price: Some(4000.0),
                ..IngredientPatch::default()
            },
            now,
        )
        .unwrap();

    let after = RecipeCostSheet::build(cafe.catalog.recipe(&milk_tea).unwrap(), &cafe.catalog);
    assert_eq!(after.semifinished[0].cost, 80.0);
    assert_eq!(after.cost, 110.0);
    assert_eq!(after.profit, 690.0);
}

#[test]
fn composition_edit_is_picked_up_on_next_computation() {
    let mut cafe = cafe();
    let now = Utc::now();
    let latte = RecipeId::new();
    let mut input = recipe("Latte", 1200.0);
    input.ingredients = vec![line(cafe.milk, 350.0)];
    cafe.catalog.add_recipe(latte, input, now).unwrap();
    assert_eq!(recipe_cost(cafe.catalog.recipe(&latte).unwrap(), &cafe.catalog), 105.0);

    cafe.catalog
        .update_recipe(
            &latte,
            RecipePatch {
                ingredients: Some(vec![line(cafe.milk, 250.0)]),
                ..RecipePatch::default()
            },
            now,
        )
        .unwrap();
    assert_eq!(recipe_cost(cafe.catalog.recipe(&latte).unwrap(), &cafe.catalog), 75.0);
}

#[test]
fn listing_covers_the_whole_menu() {
    let mut cafe = cafe();
    let now = Utc::now();
    let mut latte = recipe("Latte", 1200.0);
    latte.ingredients = vec![line(cafe.milk, 350.0)];
    cafe.catalog.add_recipe(RecipeId::new(), latte, now).unwrap();
    cafe.catalog
        .add_recipe(RecipeId::new(), recipe("Espresso", 700.0), now)
        .unwrap();

    let recipes = cafe.catalog.recipes(&Default::default());
    let rows = pos_listing(recipes, &cafe.catalog);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Espresso");
    assert_eq!(rows[1].cost, 105.0);
    assert_eq!(rows[1].markup_percentage, 1042.86);
}

#[test]
fn seasoning_lines_round_like_the_till_receipt() {
    let mut cafe = cafe();
    let now = Utc::now();
    let salt = IngredientId::new();
    let flour = IngredientId::new();
    cafe.catalog
        .add_ingredient(salt, ingredient("Salt", Unit::Kilogram, 15.0), now)
        .unwrap();
    cafe.catalog
        .add_ingredient(flour, ingredient("Flour", Unit::Kilogram, 5.0), now)
        .unwrap();

    let id = RecipeId::new();
    let mut input = recipe("Pretzel bite", 2.0);
    input.ingredients = vec![line(salt, 1.0), line(flour, 25.0)];
    cafe.catalog.add_recipe(id, input, now).unwrap();

    let sheet = RecipeCostSheet::build(cafe.catalog.recipe(&id).unwrap(), &cafe.catalog);
    let lines: Vec<f64> = sheet.ingredients.iter().map(|l| l.cost).collect();
    assert_eq!(lines, vec![0.01, 0.12]);
    assert_eq!(sheet.cost, 0.01 + 0.12);
    assert_eq!(sheet.markup_percentage, 1438.46);
    assert_eq!(sheet.profit, 2.0 - (0.01 + 0.12));
}

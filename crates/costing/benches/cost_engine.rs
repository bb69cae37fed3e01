use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use menucost_catalog::{
    Catalog, CatalogSnapshot, Ingredient, Recipe, RecipeIngredient, RecipeSemifinished,
    Semifinished, SemifinishedIngredient, Unit,
};
use menucost_core::{IngredientId, RecipeId, SemifinishedId};
use menucost_costing::{pos_listing, recipe_cost, RecipeCostSheet};

fn ingredient(i: usize) -> Ingredient {
    Ingredient {
        id: IngredientId::new(),
        name: format!("ingredient-{i}"),
        category: None,
        unit: Unit::ALL[i % Unit::ALL.len()],
        purchase_price: 100.0 + i as f64,
        stock_quantity: 0.0,
        min_stock: 0.0,
        created_at: None,
        updated_at: None,
    }
}

/// A menu of `recipes` dishes, each with 6 ingredient lines and 2 semifinished lines.
fn menu(recipes: usize) -> (Catalog, Vec<RecipeId>) {
    let ingredients: Vec<Ingredient> = (0..40).map(ingredient).collect();
    let semifinished: Vec<Semifinished> = (0..8)
        .map(|s| Semifinished {
            id: SemifinishedId::new(),
            name: format!("base-{s}"),
            category: None,
            unit: Unit::Gram,
            output_quantity: 500.0,
            ingredients: (0..4)
                .map(|k| SemifinishedIngredient {
                    ingredient_id: ingredients[(s * 4 + k) % ingredients.len()].id,
                    weight: 25.0 + k as f64,
                })
                .collect(),
            created_at: None,
            updated_at: None,
        })
        .collect();
    let dishes: Vec<Recipe> = (0..recipes)
        .map(|r| Recipe {
            id: RecipeId::new(),
            name: format!("dish-{r}"),
            category: None,
            output_weight: 300.0,
            price: 1500.0,
            is_weight_based: false,
            exclude_from_discounts: false,
            show_in_pos: true,
            image_url: None,
            ingredients: (0..6)
                .map(|k| RecipeIngredient {
                    ingredient_id: ingredients[(r + k) % ingredients.len()].id,
                    gross_weight: 60.0,
                    net_weight: 50.0,
                    cooking_method: None,
                    is_cleaned: false,
                })
                .collect(),
            semifinished_items: (0..2)
                .map(|k| RecipeSemifinished {
                    semifinished_id: semifinished[(r + k) % semifinished.len()].id,
                    quantity: 120.0,
                })
                .collect(),
            created_at: None,
            updated_at: None,
        })
        .collect();
    let ids = dishes.iter().map(|d| d.id).collect();

    let catalog = Catalog::from_snapshot(CatalogSnapshot {
        ingredients,
        semifinished,
        recipes: dishes,
    })
    .expect("generated snapshot has unique ids");
    (catalog, ids)
}

fn bench_recipe_cost(c: &mut Criterion) {
    let (catalog, ids) = menu(1);
    let recipe = catalog.recipe(&ids[0]).expect("recipe exists");

    c.bench_function("recipe_cost", |b| {
        b.iter(|| recipe_cost(black_box(recipe), &catalog))
    });
    c.bench_function("recipe_cost_sheet", |b| {
        b.iter(|| RecipeCostSheet::build(black_box(recipe), &catalog))
    });
}

fn bench_pos_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pos_listing");

    for size in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("recipes", size), size, |b, &size| {
            let (catalog, _) = menu(size);
            let snapshot = catalog.to_snapshot();
            b.iter(|| pos_listing(black_box(&snapshot.recipes), &catalog));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recipe_cost, bench_pos_listing);
criterion_main!(benches);

//! Purchase report: how much of each ingredient to buy for a set of recipes.
//!
//! Each requested recipe is scaled from its portion size to the requested
//! headcount. Partial units cannot be bought, so every scaled quantity is
//! rounded up before it is added to the ingredient's total.
//!
//! Totals are keyed by ingredient *name*. Two ingredient records that share a
//! name end up in one bucket, and the site of the last record processed wins.

use crate::error::ReportError;
use crate::store::RecipeCatalog;
use crate::wire::{parse_id, parse_report_people, WireNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the `recetas` list in `POST /reporte`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportRequestEntry {
    #[serde(rename = "receta", default)]
    pub recipe: Option<WireNumber>,
    #[serde(rename = "numero_personas", default)]
    pub people_count: Option<WireNumber>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLine {
    pub recipe_id: i32,
    pub people_count: u32,
}

/// Totals for one ingredient name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LineItem {
    #[serde(rename = "sitio")]
    pub site: String,
    /// Whole units to buy.
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    /// Name of every recipe that contributed, repeated once per contribution.
    #[serde(rename = "recetas")]
    pub recipes: Vec<String>,
    #[serde(rename = "costo")]
    pub cost: f64,
}

pub type PurchaseReport = BTreeMap<String, LineItem>;

/// Converts wire entries into typed lines, failing on the first bad entry.
pub fn parse_report_request<E>(
    entries: &[ReportRequestEntry],
) -> Result<Vec<ReportLine>, ReportError<E>> {
    entries
        .iter()
        .map(|entry| {
            let recipe_id = entry
                .recipe
                .as_ref()
                .and_then(parse_id)
                .ok_or_else(|| ReportError::UnknownRecipe {
                    reference: entry
                        .recipe
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                })?;
            let people_count = entry
                .people_count
                .as_ref()
                .and_then(parse_report_people)
                .ok_or(ReportError::InvalidPeopleCount)?;
            Ok(ReportLine {
                recipe_id,
                people_count,
            })
        })
        .collect()
}

/// Units of an ingredient needed to serve `people_count` from a recipe that
/// uses `quantity` per `portion` people. `None` when the result does not fit
/// in an `i64`.
pub fn scaled_units(quantity: f64, people_count: u32, portion: f64) -> Option<i64> {
    let units = ((quantity * f64::from(people_count)) / portion).ceil();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    (units.is_finite() && units >= 0.0 && units < i64::MAX as f64).then_some(units as i64)
}

/// Builds the report. Any unknown recipe or ingredient fails the whole call.
pub fn aggregate_purchase_report<C: RecipeCatalog>(
    catalog: &mut C,
    requests: &[ReportLine],
) -> Result<PurchaseReport, ReportError<C::Error>> {
    let mut report = PurchaseReport::new();

    for request in requests {
        let recipe = catalog
            .get_recipe(request.recipe_id)
            .map_err(ReportError::Store)?
            .ok_or_else(|| ReportError::UnknownRecipe {
                reference: request.recipe_id.to_string(),
            })?;

        if recipe.portion.is_nan() || recipe.portion <= 0.0 {
            return Err(ReportError::InvalidPortion {
                recipe: recipe.name,
            });
        }

        for line in &recipe.lines {
            let ingredient = catalog
                .get_ingredient(line.ingredient_id)
                .map_err(ReportError::Store)?
                .ok_or_else(|| ReportError::UnknownIngredient {
                    recipe: recipe.name.clone(),
                    ingredient_id: line.ingredient_id,
                })?;

            let out_of_range = || ReportError::QuantityOutOfRange {
                ingredient: ingredient.name.clone(),
            };
            let units = scaled_units(line.quantity, request.people_count, recipe.portion)
                .ok_or_else(out_of_range)?;
            let added_cost = ingredient.unit_cost * units as f64;

            let item = report
                .entry(ingredient.name.clone())
                .or_insert_with(|| LineItem {
                    site: String::new(),
                    quantity: 0,
                    recipes: Vec::new(),
                    cost: 0.0,
                });
            let quantity = item.quantity.checked_add(units).ok_or_else(out_of_range)?;
            let cost = item.cost + added_cost;
            if !cost.is_finite() {
                return Err(out_of_range());
            }
            item.quantity = quantity;
            item.cost = cost;
            item.recipes.push(recipe.name.clone());
            item.site = ingredient.site;
        }
    }

    tracing::debug!(
        recipes = requests.len(),
        ingredients = report.len(),
        "purchase report aggregated"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::store::{CatalogIngredient, CatalogRecipe, RecipeLine};
    use std::convert::Infallible;

    fn ingredient(id: i32, name: &str, unit_cost: f64, site: &str) -> CatalogIngredient {
        CatalogIngredient {
            id,
            name: name.to_string(),
            unit_cost,
            site: site.to_string(),
        }
    }

    fn recipe(id: i32, name: &str, portion: f64, lines: &[(i32, f64)]) -> CatalogRecipe {
        CatalogRecipe {
            id,
            name: name.to_string(),
            portion,
            lines: lines
                .iter()
                .map(|&(ingredient_id, quantity)| RecipeLine {
                    ingredient_id,
                    quantity,
                })
                .collect(),
        }
    }

    fn line(recipe_id: i32, people_count: u32) -> ReportLine {
        ReportLine {
            recipe_id,
            people_count,
        }
    }

    #[test]
    fn test_scaled_units_rounds_up() {
        assert_eq!(scaled_units(1.0, 20, 5.0), Some(4));
        assert_eq!(scaled_units(1.0, 21, 5.0), Some(5));
        assert_eq!(scaled_units(0.5, 3, 4.0), Some(1));
        assert_eq!(scaled_units(0.0, 10, 4.0), Some(0));
    }

    #[test]
    fn test_scaled_units_out_of_range() {
        assert_eq!(scaled_units(1e300, u32::MAX, 1.0), None);
        assert_eq!(scaled_units(f64::MAX, 2, 0.5), None);
    }

    #[test]
    fn test_quantity_overflow_is_rejected() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Sal", 1.0, "Plaza"))
            .with_recipe(10, recipe(1, "Salmuera", 1.0, &[(1, 5e18), (1, 5e18)]));

        let err = aggregate_purchase_report(&mut store, &[line(1, 1)]).unwrap_err();
        assert!(matches!(
            err,
            ReportError::QuantityOutOfRange { ref ingredient } if ingredient == "Sal"
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_infinite_cost_is_rejected() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Azafrán", f64::MAX, "Plaza"))
            .with_recipe(10, recipe(1, "Paella", 1.0, &[(1, 4.0)]));

        let err = aggregate_purchase_report(&mut store, &[line(1, 1)]).unwrap_err();
        assert!(matches!(err, ReportError::QuantityOutOfRange { .. }));
    }

    #[test]
    fn test_single_recipe_scaled_to_headcount() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Tomate", 1500.0, "Plaza"))
            .with_recipe(10, recipe(1, "Ensalada", 5.0, &[(1, 1.0)]));

        let report = aggregate_purchase_report(&mut store, &[line(1, 20)]).unwrap();
        let tomato = &report["Tomate"];
        assert_eq!(tomato.quantity, 4);
        assert_eq!(tomato.cost, 6000.0);
        assert_eq!(tomato.site, "Plaza");
        assert_eq!(tomato.recipes, vec!["Ensalada"]);
    }

    #[test]
    fn test_accumulates_across_recipes() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Cebolla", 200.0, "Plaza"))
            .with_ingredient(ingredient(2, "Arroz", 3000.0, "Éxito"))
            .with_recipe(10, recipe(1, "Arroz con pollo", 4.0, &[(1, 1.0), (2, 2.0)]))
            .with_recipe(10, recipe(2, "Sopa", 2.0, &[(1, 1.0)]));

        let report = aggregate_purchase_report(&mut store, &[line(1, 8), line(2, 3)]).unwrap();

        assert_eq!(report.len(), 2);
        let onion = &report["Cebolla"];
        assert_eq!(onion.quantity, 2 + 2);
        assert_eq!(onion.cost, 800.0);
        assert_eq!(onion.recipes, vec!["Arroz con pollo", "Sopa"]);
        assert_eq!(report["Arroz"].quantity, 4);
    }

    #[test]
    fn test_repeated_recipe_is_listed_twice() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Papa", 100.0, "Plaza"))
            .with_recipe(10, recipe(1, "Puré", 2.0, &[(1, 1.0)]));

        let report = aggregate_purchase_report(&mut store, &[line(1, 2), line(1, 3)]).unwrap();
        assert_eq!(report["Papa"].quantity, 1 + 2);
        assert_eq!(report["Papa"].recipes, vec!["Puré", "Puré"]);
    }

    #[test]
    fn test_same_name_ingredients_merge_and_last_site_wins() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Leche", 1000.0, "Tienda A"))
            .with_ingredient(ingredient(2, "Leche", 1200.0, "Tienda B"))
            .with_recipe(10, recipe(1, "Flan", 1.0, &[(1, 1.0)]))
            .with_recipe(10, recipe(2, "Arequipe", 1.0, &[(2, 1.0)]));

        let report = aggregate_purchase_report(&mut store, &[line(1, 1), line(2, 1)]).unwrap();
        assert_eq!(report.len(), 1);
        let milk = &report["Leche"];
        assert_eq!(milk.quantity, 2);
        assert_eq!(milk.cost, 2200.0);
        assert_eq!(milk.site, "Tienda B");
    }

    #[test]
    fn test_unknown_recipe_fails_without_partial_report() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Tomate", 1.0, "Plaza"))
            .with_recipe(10, recipe(1, "Ensalada", 5.0, &[(1, 1.0)]));

        let result = aggregate_purchase_report(&mut store, &[line(1, 20), line(500_000, 20)]);
        assert!(matches!(
            result,
            Err(ReportError::UnknownRecipe { ref reference }) if reference == "500000"
        ));
    }

    #[test]
    fn test_dangling_ingredient() {
        let mut store =
            InMemoryStore::new().with_recipe(10, recipe(1, "Ensalada", 5.0, &[(99, 1.0)]));

        let result = aggregate_purchase_report(&mut store, &[line(1, 5)]);
        assert!(matches!(
            result,
            Err(ReportError::UnknownIngredient {
                ingredient_id: 99,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_portion_rejected() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Sal", 1.0, "Plaza"))
            .with_recipe(10, recipe(1, "Caldo", 0.0, &[(1, 1.0)]));

        let result = aggregate_purchase_report(&mut store, &[line(1, 5)]);
        assert!(matches!(result, Err(ReportError::InvalidPortion { .. })));
    }

    #[test]
    fn test_idempotent() {
        let mut store = InMemoryStore::new()
            .with_ingredient(ingredient(1, "Tomate", 1.5, "Plaza"))
            .with_recipe(10, recipe(1, "Ensalada", 3.0, &[(1, 2.0)]));

        let first = aggregate_purchase_report(&mut store, &[line(1, 7)]).unwrap();
        let second = aggregate_purchase_report(&mut store, &[line(1, 7)]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_request() {
        let entries: Vec<ReportRequestEntry> =
            serde_json::from_str(r#"[{"receta": "4", "numero_personas": 20}]"#).unwrap();
        let lines = parse_report_request::<Infallible>(&entries).unwrap();
        assert_eq!(lines, vec![line(4, 20)]);
    }

    #[test]
    fn test_parse_request_rejects_bad_headcount() {
        let entries: Vec<ReportRequestEntry> =
            serde_json::from_str(r#"[{"receta": 4, "numero_personas": 0}]"#).unwrap();
        assert!(matches!(
            parse_report_request::<Infallible>(&entries),
            Err(ReportError::InvalidPeopleCount)
        ));
    }

    #[test]
    fn test_parse_request_rejects_missing_recipe() {
        let entries: Vec<ReportRequestEntry> =
            serde_json::from_str(r#"[{"numero_personas": 3}]"#).unwrap();
        assert!(matches!(
            parse_report_request::<Infallible>(&entries),
            Err(ReportError::UnknownRecipe { .. })
        ));
    }

    #[test]
    fn test_line_item_wire_names() {
        let item = LineItem {
            site: "Plaza".to_string(),
            quantity: 4,
            recipes: vec!["Ensalada".to_string()],
            cost: 6.5,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "sitio": "Plaza",
                "cantidad": 4,
                "recetas": ["Ensalada"],
                "costo": 6.5
            })
        );
    }
}

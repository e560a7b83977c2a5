//! Purchase report behaviour from the wire request down to the totals.

use cocina_core::store::{CatalogIngredient, CatalogRecipe, RecipeLine};
use cocina_core::{
    aggregate_purchase_report, parse_report_request, InMemoryStore, ReportError,
    ReportRequestEntry,
};
use std::convert::Infallible;

fn catalog() -> InMemoryStore {
    InMemoryStore::new()
        .with_ingredient(CatalogIngredient {
            id: 1,
            name: "Tomate chonto".to_string(),
            unit_cost: 1200.0,
            site: "Plaza de mercado".to_string(),
        })
        .with_recipe(
            1,
            CatalogRecipe {
                id: 7,
                name: "Ensalada".to_string(),
                portion: 5.0,
                lines: vec![RecipeLine {
                    ingredient_id: 1,
                    quantity: 1.0,
                }],
            },
        )
}

fn request(json: &str) -> Vec<ReportRequestEntry> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn twenty_people_from_portion_of_five_needs_four_units() {
    let mut store = catalog();
    let lines =
        parse_report_request::<Infallible>(&request(r#"[{"numero_personas": 20, "receta": 7}]"#))
            .unwrap();

    let report = aggregate_purchase_report(&mut store, &lines).unwrap();
    assert_eq!(report["Tomate chonto"].quantity, 4);
    assert_eq!(report["Tomate chonto"].cost, 4800.0);
}

#[test]
fn unknown_recipe_returns_no_report() {
    let mut store = catalog();
    let lines = parse_report_request::<Infallible>(&request(
        r#"[{"numero_personas": 20, "receta": 7}, {"numero_personas": 20, "receta": 500000}]"#,
    ))
    .unwrap();

    let result = aggregate_purchase_report(&mut store, &lines);
    let Err(error) = result else {
        panic!("report should fail for an unknown recipe");
    };
    assert!(error.is_client_error());
    assert_eq!(error.to_string(), "Al menos una receta seleccionada no existe");
}

#[test]
fn report_serializes_with_wire_field_names() {
    let mut store = catalog();
    let lines =
        parse_report_request::<Infallible>(&request(r#"[{"numero_personas": "6", "receta": "7"}]"#))
            .unwrap();
    let report = aggregate_purchase_report(&mut store, &lines).unwrap();

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({
            "Tomate chonto": {
                "sitio": "Plaza de mercado",
                "cantidad": 2,
                "recetas": ["Ensalada"],
                "costo": 2400.0
            }
        })
    );
}

#[test]
fn empty_request_yields_empty_report() {
    let mut store = catalog();
    let report = aggregate_purchase_report(&mut store, &[]).unwrap();
    assert!(report.is_empty());
    assert!(matches!(
        parse_report_request::<Infallible>(&request("[]")),
        Ok(lines) if lines.is_empty()
    ));
}

#[test]
fn store_errors_are_not_client_errors() {
    let error: ReportError<std::io::Error> =
        ReportError::Store(std::io::Error::other("connection reset"));
    assert!(!error.is_client_error());
}

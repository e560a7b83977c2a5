pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::models::Ingredient;
use crate::AppState;
use axum::routing::get;
use axum::Router;
use cocina_core::wire::parse_non_negative;
use cocina_core::WireNumber;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

const MAX_TEXT_LEN: usize = 128;

pub const NOT_FOUND: &str = "Ingrediente no encontrado";
pub const DUPLICATE_NAME: &str = "El ingrediente ya existe con ese nombre.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ingredientes",
            get(list::list_ingredients).post(create::create_ingredient),
        )
        .route(
            "/ingrediente/{id}",
            get(get::get_ingredient)
                .put(update::update_ingredient)
                .delete(delete::delete_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        create::create_ingredient,
        get::get_ingredient,
        update::update_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(IngredientRequest, IngredientResponse, WireNumber))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct IngredientRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "unidad")]
    pub unit: Option<String>,
    #[serde(rename = "costo")]
    pub unit_cost: Option<WireNumber>,
    #[serde(rename = "calorias")]
    pub calories: Option<WireNumber>,
    #[serde(rename = "sitio")]
    pub site: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i32,
    pub nombre: String,
    pub unidad: String,
    pub costo: f64,
    pub calorias: f64,
    pub sitio: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(i: Ingredient) -> Self {
        Self {
            id: i.id,
            nombre: i.name,
            unidad: i.unit,
            costo: i.unit_cost,
            calorias: i.calories,
            sitio: i.site,
        }
    }
}

/// Checked ingredient fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientFields {
    pub name: String,
    pub unit: String,
    pub unit_cost: f64,
    pub calories: f64,
    pub site: String,
}

fn required_text(value: Option<&String>, field: &str) -> Result<String, String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && v.chars().count() <= MAX_TEXT_LEN)
        .map(str::to_string)
        .ok_or_else(|| format!("Datos inválidos: '{}' es obligatorio", field))
}

fn non_negative(value: Option<&WireNumber>, field: &str) -> Result<f64, String> {
    value
        .and_then(parse_non_negative)
        .ok_or_else(|| format!("Datos inválidos: '{}' debe ser un número no negativo", field))
}

pub fn validate_ingredient(req: &IngredientRequest) -> Result<IngredientFields, String> {
    Ok(IngredientFields {
        name: required_text(req.name.as_ref(), "nombre")?,
        unit: required_text(req.unit.as_ref(), "unidad")?,
        unit_cost: non_negative(req.unit_cost.as_ref(), "costo")?,
        calories: non_negative(req.calories.as_ref(), "calorias")?,
        site: required_text(req.site.as_ref(), "sitio")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> IngredientRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_accepts_numeric_strings() {
        let fields = validate_ingredient(&request(
            r#"{"nombre":" Tomate ","unidad":"kg","costo":"2.5","calorias":18,"sitio":"Mercado"}"#,
        ))
        .unwrap();
        assert_eq!(fields.name, "Tomate");
        assert_eq!(fields.unit_cost, 2.5);
        assert_eq!(fields.calories, 18.0);
    }

    #[test]
    fn test_rejects_negative_cost() {
        let err = validate_ingredient(&request(
            r#"{"nombre":"Tomate","unidad":"kg","costo":-1,"calorias":18,"sitio":"Mercado"}"#,
        ))
        .unwrap_err();
        assert!(err.contains("costo"));
    }

    #[test]
    fn test_rejects_blank_site() {
        let err = validate_ingredient(&request(
            r#"{"nombre":"Tomate","unidad":"kg","costo":1,"calorias":18,"sitio":"  "}"#,
        ))
        .unwrap_err();
        assert!(err.contains("sitio"));
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = validate_ingredient(&IngredientRequest::default()).unwrap_err();
        assert!(err.contains("nombre"));
    }
}

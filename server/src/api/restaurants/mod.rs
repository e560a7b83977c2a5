pub mod create;
pub mod get;
pub mod list;
pub mod update;

use crate::models::Restaurant;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub const NOT_FOUND: &str = "Restaurante no encontrado";
pub const DUPLICATE_NAME: &str = "El restaurante ya existe con ese nombre.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurante", post(create::create_restaurant))
        .route(
            "/restaurante/{id}",
            get(get::get_restaurant).put(update::update_restaurant),
        )
        .route("/restaurantes/{id_usuario}", get(list::list_restaurants))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_restaurant,
        get::get_restaurant,
        update::update_restaurant,
        list::list_restaurants,
    ),
    components(schemas(RestaurantRequest, RestaurantResponse))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RestaurantRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "redes_sociales")]
    pub social_media: Option<String>,
    #[serde(rename = "horarios_abre")]
    pub opening_hours: Option<String>,
    #[serde(rename = "tipo_comida")]
    pub cuisine: Option<String>,
    #[serde(rename = "aplicaciones_asociadas")]
    pub delivery_apps: Option<String>,
    #[serde(rename = "opciones_servicio")]
    pub service_options: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: i32,
    pub nombre: String,
    pub direccion: String,
    pub telefono: String,
    pub redes_sociales: String,
    pub horarios_abre: String,
    pub tipo_comida: String,
    pub aplicaciones_asociadas: String,
    pub opciones_servicio: String,
    pub administrador_id: i32,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id,
            nombre: r.name,
            direccion: r.address,
            telefono: r.phone,
            redes_sociales: r.social_media,
            horarios_abre: r.opening_hours,
            tipo_comida: r.cuisine,
            aplicaciones_asociadas: r.delivery_apps,
            opciones_servicio: r.service_options,
            administrador_id: r.administrator_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestaurantFields {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub social_media: String,
    pub opening_hours: String,
    pub cuisine: String,
    pub delivery_apps: String,
    pub service_options: String,
}

fn required(value: Option<&str>, max: usize, message: &str) -> Result<String, String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.chars().count() <= max)
        .map(str::to_string)
        .ok_or_else(|| message.to_string())
}

fn optional(value: Option<&str>, max: usize, message: &str) -> Result<String, String> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.chars().count() > max {
        return Err(message.to_string());
    }
    Ok(value.to_string())
}

pub fn validate_restaurant(req: &RestaurantRequest) -> Result<RestaurantFields, String> {
    let name = required(req.name.as_deref(), 200, "Nombre inválido")?;
    let address = required(req.address.as_deref(), 200, "Dirección inválida")?;
    let phone = required(req.phone.as_deref(), 20, "Teléfono inválido")?;
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err("Teléfono inválido".to_string());
    }

    Ok(RestaurantFields {
        name,
        address,
        phone,
        social_media: optional(req.social_media.as_deref(), 500, "Redes sociales inválidas")?,
        opening_hours: optional(req.opening_hours.as_deref(), 500, "Horarios inválidos")?,
        cuisine: optional(req.cuisine.as_deref(), 500, "Tipo de comida inválido")?,
        delivery_apps: optional(
            req.delivery_apps.as_deref(),
            500,
            "Aplicaciones asociadas inválidas",
        )?,
        service_options: optional(
            req.service_options.as_deref(),
            50,
            "Opciones de servicio inválidas",
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RestaurantRequest {
        RestaurantRequest {
            name: Some("La Esquina".to_string()),
            address: Some("Calle 1".to_string()),
            phone: Some("+57 300-123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_restaurant() {
        let fields = validate_restaurant(&base()).unwrap();
        assert_eq!(fields.name, "La Esquina");
        assert_eq!(fields.cuisine, "");
    }

    #[test]
    fn test_phone_must_look_like_a_number() {
        let req = RestaurantRequest {
            phone: Some("llamar".to_string()),
            ..base()
        };
        assert_eq!(validate_restaurant(&req).unwrap_err(), "Teléfono inválido");
    }

    #[test]
    fn test_blank_name_rejected() {
        let req = RestaurantRequest {
            name: Some("   ".to_string()),
            ..base()
        };
        assert_eq!(validate_restaurant(&req).unwrap_err(), "Nombre inválido");
    }

    #[test]
    fn test_long_service_options_rejected() {
        let req = RestaurantRequest {
            service_options: Some("x".repeat(51)),
            ..base()
        };
        assert!(validate_restaurant(&req).is_err());
    }
}

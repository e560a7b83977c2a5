pub mod create;
pub mod list;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use cocina_core::wire::parse_id;
use cocina_core::WireNumber;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chefs", post(create::create_chef))
        .route("/chefs/{id_restaurante}", get(list::list_chefs))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::create_chef, list::list_chefs),
    components(schemas(CreateChefRequest, ChefResponse))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateChefRequest {
    #[serde(rename = "restaurante_id")]
    pub restaurant_id: Option<WireNumber>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "usuario")]
    pub username: Option<String>,
    #[serde(rename = "contrasena")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChefResponse {
    pub id: i32,
    pub nombre: String,
    pub usuario: String,
    pub restaurante_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChefFields {
    pub restaurant_id: i32,
    pub name: String,
    pub username: String,
    pub password: String,
}

fn bounded(value: Option<&str>, max: usize) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty() && v.chars().count() <= max)
}

pub fn validate_chef(req: &CreateChefRequest) -> Result<ChefFields, String> {
    let restaurant_id = req
        .restaurant_id
        .as_ref()
        .and_then(parse_id)
        .ok_or_else(|| "El restaurante no se seleccionó".to_string())?;
    let name = bounded(req.name.as_deref(), 200).ok_or("El nombre es inválido")?;
    let username = bounded(req.username.as_deref(), 50).ok_or("El usuario es inválido")?;
    let password = bounded(req.password.as_deref(), 50).ok_or("La contraseña es inválida")?;

    Ok(ChefFields {
        restaurant_id,
        name: name.trim().to_string(),
        username: username.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateChefRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_chef() {
        let fields = validate_chef(&request(
            r#"{"restaurante_id":"3","nombre":"Lucía","usuario":"lucia","contrasena":"pw"}"#,
        ))
        .unwrap();
        assert_eq!(fields.restaurant_id, 3);
        assert_eq!(fields.username, "lucia");
    }

    #[test]
    fn test_missing_restaurant() {
        let err = validate_chef(&request(
            r#"{"nombre":"Lucía","usuario":"lucia","contrasena":"pw"}"#,
        ))
        .unwrap_err();
        assert_eq!(err, "El restaurante no se seleccionó");
    }

    #[test]
    fn test_password_length_bounded() {
        let req = CreateChefRequest {
            restaurant_id: Some(WireNumber::Integer(1)),
            name: Some("Lucía".to_string()),
            username: Some("lucia".to_string()),
            password: Some("x".repeat(51)),
        };
        assert_eq!(validate_chef(&req).unwrap_err(), "La contraseña es inválida");
    }

    #[test]
    fn test_blank_name() {
        let err = validate_chef(&request(
            r#"{"restaurante_id":1,"nombre":"  ","usuario":"lucia","contrasena":"pw"}"#,
        ))
        .unwrap_err();
        assert_eq!(err, "El nombre es inválido");
    }
}

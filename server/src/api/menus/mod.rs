pub mod create;
pub mod list;

use crate::models::Menu;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDateTime;
use cocina_core::dates::display_format;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", post(create::create_menu))
        .route("/menus", get(list::list_own_restaurant_menus))
        .route("/menus/{id_restaurante}", get(list::list_restaurant_menus))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_menu,
        list::list_restaurant_menus,
        list::list_own_restaurant_menus,
    ),
    components(schemas(
        cocina_core::MenuPayload,
        cocina_core::MenuRecipeEntry,
        cocina_core::WireNumber,
        MenuSummary,
    ))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MenuSummary {
    pub id: i32,
    pub nombre: String,
    #[serde(serialize_with = "display_format")]
    #[schema(value_type = String, example = "01/10/2026 12:00")]
    pub fecha_inicio: NaiveDateTime,
    #[serde(serialize_with = "display_format")]
    #[schema(value_type = String, example = "01/10/2026 16:00")]
    pub fecha_fin: NaiveDateTime,
    pub restaurante_id: i32,
}

impl From<Menu> for MenuSummary {
    fn from(m: Menu) -> Self {
        Self {
            id: m.id,
            nombre: m.name,
            fecha_inicio: m.starts_at,
            fecha_fin: m.ends_at,
            restaurante_id: m.restaurant_id,
        }
    }
}

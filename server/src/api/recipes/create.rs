use crate::api::{
    access_denied, error_response, internal_error, CreatedResponse, ErrorResponse,
};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewRecipe, NewRecipeIngredient};
use crate::schema::{recipe_ingredients, recipes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

use super::{
    administrator_of_user, ingredients_owned, validate_recipe, RecipeRequest, UNKNOWN_INGREDIENT,
};

#[utoipa::path(
    post,
    path = "/recetas/{id_usuario}",
    tag = "recipes",
    params(("id_usuario" = i32, Path, description = "Administrator or chef user ID")),
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = CreatedResponse),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 403, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(user_id): Path<i32>,
    Json(req): Json<RecipeRequest>,
) -> impl IntoResponse {
    let fields = match validate_recipe(&req) {
        Ok(f) => f,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let mut conn = get_conn!(pool);

    let administrator_id = match administrator_of_user(&mut conn, user_id) {
        Ok(Some(id)) if id == actor.administrator_id() => id,
        Ok(Some(_)) => return access_denied(),
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Usuario no encontrado"),
        Err(e) => return internal_error("Failed to resolve recipe owner", e),
    };

    match ingredients_owned(&mut conn, administrator_id, &fields.lines) {
        Ok(true) => {}
        Ok(false) => return error_response(StatusCode::BAD_REQUEST, UNKNOWN_INGREDIENT),
        Err(e) => return internal_error("Failed to check recipe ingredients", e),
    }

    // Recipe and its lines are stored together
    let result: Result<i32, diesel::result::Error> = conn.transaction(|conn| {
        let recipe_id: i32 = diesel::insert_into(recipes::table)
            .values(NewRecipe {
                name: &fields.name,
                preparation: &fields.preparation,
                duration: fields.duration,
                portion: fields.portion,
                administrator_id,
            })
            .returning(recipes::id)
            .get_result(conn)?;

        let lines: Vec<NewRecipeIngredient> = fields
            .lines
            .iter()
            .map(|line| NewRecipeIngredient {
                recipe_id,
                ingredient_id: line.ingredient_id,
                quantity: line.quantity,
            })
            .collect();

        diesel::insert_into(recipe_ingredients::table)
            .values(&lines)
            .execute(conn)?;

        Ok(recipe_id)
    });

    match result {
        Ok(id) => {
            tracing::info!(recipe_id = id, administrator_id, "recipe created");
            (
                StatusCode::CREATED,
                Json(CreatedResponse {
                    mensaje: "Receta creada exitosamente".to_string(),
                    id,
                }),
            )
                .into_response()
        }
        Err(e) => internal_error("Failed to create recipe", e),
    }
}

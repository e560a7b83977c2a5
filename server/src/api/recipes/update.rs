use crate::api::{error_response, internal_error, CreatedResponse, ErrorResponse};
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewRecipeIngredient, RecipeChanges};
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
    ingredients_owned, plan_line_changes, validate_recipe, RecipeRequest, NOT_FOUND,
    UNKNOWN_INGREDIENT,
};

/// Reasons an update is refused after the recipe has been looked up.
enum Refusal {
    NotFound,
    UnknownIngredient,
    UnknownLine(i32),
}

/// Replaces a recipe's fields and line set. Lines with an `id` are updated,
/// lines without one are inserted, and stored lines left out are deleted.
#[utoipa::path(
    put,
    path = "/receta/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = CreatedResponse),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_recipe(
    AuthUser(actor): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(req): Json<RecipeRequest>,
) -> impl IntoResponse {
    let fields = match validate_recipe(&req) {
        Ok(f) => f,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };
    let administrator_id = actor.administrator_id();

    let mut conn = get_conn!(pool);

    // All checks run before the first write so a refusal leaves nothing behind
    let result: Result<Result<(), Refusal>, diesel::result::Error> = conn.transaction(|conn| {
        let owned: Option<i32> = recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::administrator_id.eq(administrator_id))
            .select(recipes::id)
            .for_update()
            .first(conn)
            .optional()?;
        if owned.is_none() {
            return Ok(Err(Refusal::NotFound));
        }

        if !ingredients_owned(conn, administrator_id, &fields.lines)? {
            return Ok(Err(Refusal::UnknownIngredient));
        }

        let existing: Vec<i32> = recipe_ingredients::table
            .filter(recipe_ingredients::recipe_id.eq(id))
            .select(recipe_ingredients::id)
            .load(conn)?;

        let plan = match plan_line_changes(&existing, &fields.lines) {
            Ok(plan) => plan,
            Err(line_id) => return Ok(Err(Refusal::UnknownLine(line_id))),
        };

        diesel::update(recipes::table.find(id))
            .set(RecipeChanges {
                name: &fields.name,
                preparation: &fields.preparation,
                duration: fields.duration,
                portion: fields.portion,
            })
            .execute(conn)?;

        if !plan.delete.is_empty() {
            diesel::delete(
                recipe_ingredients::table.filter(recipe_ingredients::id.eq_any(&plan.delete)),
            )
            .execute(conn)?;
        }

        for (line_id, line) in &plan.update {
            diesel::update(recipe_ingredients::table.find(*line_id))
                .set((
                    recipe_ingredients::ingredient_id.eq(line.ingredient_id),
                    recipe_ingredients::quantity.eq(line.quantity),
                ))
                .execute(conn)?;
        }

        let inserts: Vec<NewRecipeIngredient> = plan
            .insert
            .iter()
            .map(|line| NewRecipeIngredient {
                recipe_id: id,
                ingredient_id: line.ingredient_id,
                quantity: line.quantity,
            })
            .collect();
        if !inserts.is_empty() {
            diesel::insert_into(recipe_ingredients::table)
                .values(&inserts)
                .execute(conn)?;
        }

        Ok(Ok(()))
    });

    match result {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(CreatedResponse {
                mensaje: "Receta actualizada exitosamente".to_string(),
                id,
            }),
        )
            .into_response(),
        Ok(Err(Refusal::NotFound)) => error_response(StatusCode::NOT_FOUND, NOT_FOUND),
        Ok(Err(Refusal::UnknownIngredient)) => {
            error_response(StatusCode::BAD_REQUEST, UNKNOWN_INGREDIENT)
        }
        Ok(Err(Refusal::UnknownLine(line_id))) => error_response(
            StatusCode::BAD_REQUEST,
            format!("La línea {} no pertenece a la receta", line_id),
        ),
        Err(e) => internal_error("Failed to update recipe", e),
    }
}

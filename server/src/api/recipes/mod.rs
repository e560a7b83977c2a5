pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::ingredients::IngredientResponse;
use crate::auth::resolve_actor;
use crate::models::{Ingredient, Recipe, RecipeIngredient};
use crate::schema::{ingredients, recipe_ingredients, users};
use crate::AppState;
use axum::routing::get;
use axum::Router;
use cocina_core::wire::{parse_id, parse_non_negative};
use cocina_core::WireNumber;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::{OpenApi, ToSchema};

const MAX_NAME_LEN: usize = 128;

pub const NOT_FOUND: &str = "Receta no encontrada";
pub const UNKNOWN_INGREDIENT: &str = "Al menos un ingrediente seleccionado no existe";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recetas/{id_usuario}",
            get(list::list_recipes).post(create::create_recipe),
        )
        .route(
            "/receta/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(RecipeRequest, RecipeLineRequest, RecipeResponse, RecipeLineResponse))
)]
pub struct ApiDoc;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "preparacion")]
    pub preparation: Option<String>,
    #[serde(rename = "duracion")]
    pub duration: Option<WireNumber>,
    #[serde(rename = "porcion")]
    pub portion: Option<WireNumber>,
    #[serde(rename = "ingredientes")]
    pub lines: Option<Vec<RecipeLineRequest>>,
}

/// One ingredient line. `id` is empty for lines that do not exist yet.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipeLineRequest {
    pub id: Option<WireNumber>,
    #[serde(rename = "cantidad")]
    pub quantity: Option<WireNumber>,
    #[serde(rename = "idIngrediente")]
    pub ingredient_id: Option<WireNumber>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeLineResponse {
    pub id: i32,
    pub cantidad: f64,
    pub ingrediente: IngredientResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub nombre: String,
    pub preparacion: String,
    pub duracion: f64,
    pub porcion: f64,
    /// Administrator that owns the recipe.
    pub usuario: i32,
    pub ingredientes: Vec<RecipeLineResponse>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFields {
    pub name: String,
    pub preparation: String,
    pub duration: f64,
    pub portion: f64,
    pub lines: Vec<RecipeLineFields>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeLineFields {
    pub id: Option<i32>,
    pub ingredient_id: i32,
    pub quantity: f64,
}

fn invalid(field: &str) -> String {
    format!("Datos inválidos: '{}'", field)
}

fn parse_line(line: &RecipeLineRequest) -> Result<RecipeLineFields, String> {
    let id = match &line.id {
        None => None,
        Some(WireNumber::Text(t)) if t.trim().is_empty() => None,
        Some(raw) => Some(parse_id(raw).ok_or_else(|| invalid("ingredientes.id"))?),
    };
    let ingredient_id = line
        .ingredient_id
        .as_ref()
        .and_then(parse_id)
        .ok_or_else(|| invalid("ingredientes.idIngrediente"))?;
    let quantity = line
        .quantity
        .as_ref()
        .and_then(parse_non_negative)
        .ok_or_else(|| invalid("ingredientes.cantidad"))?;

    Ok(RecipeLineFields {
        id,
        ingredient_id,
        quantity,
    })
}

pub fn validate_recipe(req: &RecipeRequest) -> Result<RecipeFields, String> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty() && n.chars().count() <= MAX_NAME_LEN)
        .ok_or_else(|| invalid("nombre"))?;
    let preparation = req
        .preparation
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| invalid("preparacion"))?;
    let duration = req
        .duration
        .as_ref()
        .and_then(parse_non_negative)
        .ok_or_else(|| invalid("duracion"))?;
    let portion = req
        .portion
        .as_ref()
        .and_then(|p| p.as_decimal())
        .filter(|p| *p > 0.0)
        .ok_or_else(|| invalid("porcion"))?;

    let lines = match req.lines.as_deref() {
        Some(lines) if !lines.is_empty() => lines
            .iter()
            .map(parse_line)
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err("La receta debe tener al menos un ingrediente".to_string()),
    };

    Ok(RecipeFields {
        name: name.to_string(),
        preparation: preparation.to_string(),
        duration,
        portion,
        lines,
    })
}

/// How a requested line set maps onto the stored lines of a recipe.
#[derive(Debug, PartialEq)]
pub struct LinePlan<'a> {
    pub delete: Vec<i32>,
    pub update: Vec<(i32, &'a RecipeLineFields)>,
    pub insert: Vec<&'a RecipeLineFields>,
}

/// Lines with an id must already belong to the recipe; the offending id is
/// returned otherwise. Each stored line may be referenced once.
pub fn plan_line_changes<'a>(
    existing: &[i32],
    requested: &'a [RecipeLineFields],
) -> Result<LinePlan<'a>, i32> {
    let stored: HashSet<i32> = existing.iter().copied().collect();
    let mut kept = HashSet::new();
    let mut update = Vec::new();
    let mut insert = Vec::new();

    for line in requested {
        match line.id {
            Some(id) if stored.contains(&id) && kept.insert(id) => update.push((id, line)),
            Some(id) => return Err(id),
            None => insert.push(line),
        }
    }

    let delete = existing
        .iter()
        .copied()
        .filter(|id| !kept.contains(id))
        .collect();

    Ok(LinePlan {
        delete,
        update,
        insert,
    })
}

/// True when every referenced ingredient belongs to `administrator_id`.
pub fn ingredients_owned(
    conn: &mut PgConnection,
    administrator_id: i32,
    lines: &[RecipeLineFields],
) -> QueryResult<bool> {
    let wanted: HashSet<i32> = lines.iter().map(|l| l.ingredient_id).collect();
    let ids: Vec<i32> = wanted.iter().copied().collect();

    let found: Vec<i32> = ingredients::table
        .filter(ingredients::id.eq_any(&ids))
        .filter(ingredients::administrator_id.eq(administrator_id))
        .select(ingredients::id)
        .load(conn)?;

    Ok(found.len() == wanted.len())
}

/// Effective administrator of the user named in a path, if the user exists.
pub fn administrator_of_user(conn: &mut PgConnection, user_id: i32) -> QueryResult<Option<i32>> {
    let role: Option<String> = users::table
        .find(user_id)
        .select(users::role)
        .first(conn)
        .optional()?;

    match role {
        Some(role) => Ok(resolve_actor(conn, user_id, &role)?.map(|a| a.administrator_id())),
        None => Ok(None),
    }
}

/// Attaches ingredient lines to each recipe, keeping the recipe order.
pub fn with_lines(
    conn: &mut PgConnection,
    recipes: Vec<Recipe>,
) -> QueryResult<Vec<RecipeResponse>> {
    let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();

    let rows: Vec<(RecipeIngredient, Ingredient)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&ids))
        .order(recipe_ingredients::id.asc())
        .select((RecipeIngredient::as_select(), Ingredient::as_select()))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<RecipeLineResponse>> = HashMap::new();
    for (line, ingredient) in rows {
        by_recipe
            .entry(line.recipe_id)
            .or_default()
            .push(RecipeLineResponse {
                id: line.id,
                cantidad: line.quantity,
                ingrediente: ingredient.into(),
            });
    }

    Ok(recipes
        .into_iter()
        .map(|r| RecipeResponse {
            ingredientes: by_recipe.remove(&r.id).unwrap_or_default(),
            id: r.id,
            nombre: r.name,
            preparacion: r.preparation,
            duracion: r.duration,
            porcion: r.portion,
            usuario: r.administrator_id,
        })
        .collect())
}

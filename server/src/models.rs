use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Value of `users.role` for administrators.
pub const ROLE_ADMIN: &str = "admin";
/// Value of `users.role` for chefs.
pub const ROLE_CHEF: &str = "chef";

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub id: Uuid,
    pub user_id: i32,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub social_media: String,
    pub opening_hours: String,
    pub cuisine: String,
    pub delivery_apps: String,
    pub service_options: String,
    pub administrator_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub social_media: &'a str,
    pub opening_hours: &'a str,
    pub cuisine: &'a str,
    pub delivery_apps: &'a str,
    pub service_options: &'a str,
    pub administrator_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct RestaurantChanges<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub social_media: &'a str,
    pub opening_hours: &'a str,
    pub cuisine: &'a str,
    pub delivery_apps: &'a str,
    pub service_options: &'a str,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = crate::schema::chefs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Chef {
    pub user_id: i32,
    pub name: String,
    pub restaurant_id: i32,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub unit_cost: f64,
    pub calories: f64,
    pub site: String,
    pub administrator_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
    pub unit: &'a str,
    pub unit_cost: f64,
    pub calories: f64,
    pub site: &'a str,
    pub administrator_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct IngredientChanges<'a> {
    pub name: &'a str,
    pub unit: &'a str,
    pub unit_cost: f64,
    pub calories: f64,
    pub site: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub preparation: String,
    pub duration: f64,
    pub portion: f64,
    pub administrator_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub name: &'a str,
    pub preparation: &'a str,
    pub duration: f64,
    pub portion: f64,
    pub administrator_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub name: &'a str,
    pub preparation: &'a str,
    pub duration: f64,
    pub portion: f64,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct RecipeIngredient {
    pub id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: f64,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::menus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub restaurant_id: i32,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menus)]
pub struct NewMenuRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub restaurant_id: i32,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menu_recipes)]
pub struct NewMenuRecipe {
    pub menu_id: i32,
    pub recipe_id: i32,
    pub people_count: i32,
}

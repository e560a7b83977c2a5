//! Storage seams used by the menu and report logic.
//!
//! The server implements these over PostgreSQL; [`crate::memory::InMemoryStore`]
//! implements them for tests.

use chrono::NaiveDateTime;

/// An existing menu, as far as scheduling cares.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledMenu {
    pub id: i32,
    pub name: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMenu<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub restaurant_id: i32,
    pub user_id: i32,
}

/// One recipe of a menu and how many people it is cooked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLine {
    pub recipe_id: i32,
    pub people_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecipe {
    pub id: i32,
    pub name: String,
    /// Headcount served by one preparation.
    pub portion: f64,
    pub lines: Vec<RecipeLine>,
}

/// Amount of one ingredient used by a single preparation of a recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeLine {
    pub ingredient_id: i32,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogIngredient {
    pub id: i32,
    pub name: String,
    pub unit_cost: f64,
    pub site: String,
}

pub trait MenuStore {
    type Error;

    /// Menus of `restaurant_id` with `ends_at >= start` and `starts_at <= end`.
    fn find_menus_overlapping(
        &mut self,
        restaurant_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ScheduledMenu>, Self::Error>;

    fn find_menu_by_name(
        &mut self,
        restaurant_id: i32,
        name: &str,
    ) -> Result<Option<ScheduledMenu>, Self::Error>;

    /// Owner of the restaurant, or `None` when it does not exist.
    fn restaurant_administrator(&mut self, restaurant_id: i32) -> Result<Option<i32>, Self::Error>;

    /// Owner of the recipe, or `None` when it does not exist.
    fn recipe_administrator(&mut self, recipe_id: i32) -> Result<Option<i32>, Self::Error>;

    /// Stores the menu together with its lines as one unit and returns its id.
    fn insert_menu(&mut self, menu: NewMenu<'_>, lines: &[MenuLine]) -> Result<i32, Self::Error>;
}

pub trait RecipeCatalog {
    type Error;

    fn get_recipe(&mut self, id: i32) -> Result<Option<CatalogRecipe>, Self::Error>;

    fn get_ingredient(&mut self, id: i32) -> Result<Option<CatalogIngredient>, Self::Error>;
}

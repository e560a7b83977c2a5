//! In-memory store for tests and local experiments.
//!
//! Behaves like the PostgreSQL store for every query the menu and report
//! logic issues, without any persistence.

use crate::dates::intervals_overlap;
use crate::store::{
    CatalogIngredient, CatalogRecipe, MenuLine, MenuStore, NewMenu, RecipeCatalog, ScheduledMenu,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::convert::Infallible;

/// A menu held by [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMenu {
    pub id: i32,
    pub restaurant_id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub lines: Vec<MenuLine>,
}

impl StoredMenu {
    fn scheduled(&self) -> ScheduledMenu {
        ScheduledMenu {
            id: self.id,
            name: self.name.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// restaurant id -> administrator id
    restaurants: HashMap<i32, i32>,
    /// recipe id -> (administrator id, recipe)
    recipes: HashMap<i32, (i32, CatalogRecipe)>,
    ingredients: HashMap<i32, CatalogIngredient>,
    menus: Vec<StoredMenu>,
    next_menu_id: i32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restaurant(mut self, restaurant_id: i32, administrator_id: i32) -> Self {
        self.restaurants.insert(restaurant_id, administrator_id);
        self
    }

    pub fn with_recipe(mut self, administrator_id: i32, recipe: CatalogRecipe) -> Self {
        self.recipes.insert(recipe.id, (administrator_id, recipe));
        self
    }

    pub fn with_ingredient(mut self, ingredient: CatalogIngredient) -> Self {
        self.ingredients.insert(ingredient.id, ingredient);
        self
    }

    /// Adds an existing menu with no lines and returns its id.
    pub fn add_menu(
        &mut self,
        restaurant_id: i32,
        name: &str,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> i32 {
        self.push_menu(StoredMenu {
            id: 0,
            restaurant_id,
            user_id: self.restaurants.get(&restaurant_id).copied().unwrap_or(0),
            name: name.to_string(),
            description: String::new(),
            starts_at,
            ends_at,
            lines: Vec::new(),
        })
    }

    pub fn menus(&self) -> &[StoredMenu] {
        &self.menus
    }

    fn push_menu(&mut self, mut menu: StoredMenu) -> i32 {
        self.next_menu_id += 1;
        menu.id = self.next_menu_id;
        self.menus.push(menu);
        self.next_menu_id
    }
}

impl MenuStore for InMemoryStore {
    type Error = Infallible;

    fn find_menus_overlapping(
        &mut self,
        restaurant_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ScheduledMenu>, Infallible> {
        Ok(self
            .menus
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id)
            .filter(|m| intervals_overlap(m.starts_at, m.ends_at, start, end))
            .map(StoredMenu::scheduled)
            .collect())
    }

    fn find_menu_by_name(
        &mut self,
        restaurant_id: i32,
        name: &str,
    ) -> Result<Option<ScheduledMenu>, Infallible> {
        Ok(self
            .menus
            .iter()
            .find(|m| m.restaurant_id == restaurant_id && m.name == name)
            .map(StoredMenu::scheduled))
    }

    fn restaurant_administrator(&mut self, restaurant_id: i32) -> Result<Option<i32>, Infallible> {
        Ok(self.restaurants.get(&restaurant_id).copied())
    }

    fn recipe_administrator(&mut self, recipe_id: i32) -> Result<Option<i32>, Infallible> {
        Ok(self.recipes.get(&recipe_id).map(|(owner, _)| *owner))
    }

    fn insert_menu(&mut self, menu: NewMenu<'_>, lines: &[MenuLine]) -> Result<i32, Infallible> {
        Ok(self.push_menu(StoredMenu {
            id: 0,
            restaurant_id: menu.restaurant_id,
            user_id: menu.user_id,
            name: menu.name.to_string(),
            description: menu.description.to_string(),
            starts_at: menu.starts_at,
            ends_at: menu.ends_at,
            lines: lines.to_vec(),
        }))
    }
}

impl RecipeCatalog for InMemoryStore {
    type Error = Infallible;

    fn get_recipe(&mut self, id: i32) -> Result<Option<CatalogRecipe>, Infallible> {
        Ok(self.recipes.get(&id).map(|(_, recipe)| recipe.clone()))
    }

    fn get_ingredient(&mut self, id: i32) -> Result<Option<CatalogIngredient>, Infallible> {
        Ok(self.ingredients.get(&id).cloned())
    }
}

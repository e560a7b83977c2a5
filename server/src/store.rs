//! PostgreSQL implementation of the storage seams in `cocina_core::store`.

use chrono::NaiveDateTime;
use cocina_core::store::{
    CatalogIngredient, CatalogRecipe, MenuLine, MenuStore, NewMenu, RecipeCatalog, RecipeLine,
    ScheduledMenu,
};
use diesel::prelude::*;

use crate::models::{Ingredient, NewMenuRecipe, NewMenuRow, Recipe};
use crate::schema::{ingredients, menu_recipes, menus, recipe_ingredients, recipes, restaurants};

pub struct PgStore<'a> {
    conn: &'a mut PgConnection,
    /// When set, catalog lookups only see this administrator's recipes and
    /// ingredients.
    administrator_id: Option<i32>,
}

impl<'a> PgStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self {
            conn,
            administrator_id: None,
        }
    }

    pub fn scoped_to(conn: &'a mut PgConnection, administrator_id: i32) -> Self {
        Self {
            conn,
            administrator_id: Some(administrator_id),
        }
    }

    fn conn(&mut self) -> &mut PgConnection {
        self.conn
    }

    fn visible(&self, owner: i32) -> bool {
        self.administrator_id.is_none_or(|admin| admin == owner)
    }
}

type MenuWindow = (i32, String, NaiveDateTime, NaiveDateTime);

fn scheduled((id, name, starts_at, ends_at): MenuWindow) -> ScheduledMenu {
    ScheduledMenu {
        id,
        name,
        starts_at,
        ends_at,
    }
}

impl MenuStore for PgStore<'_> {
    type Error = diesel::result::Error;

    fn find_menus_overlapping(
        &mut self,
        restaurant_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> QueryResult<Vec<ScheduledMenu>> {
        let rows: Vec<MenuWindow> = menus::table
            .filter(menus::restaurant_id.eq(restaurant_id))
            .filter(menus::ends_at.ge(start))
            .filter(menus::starts_at.le(end))
            .select((menus::id, menus::name, menus::starts_at, menus::ends_at))
            .order(menus::starts_at.asc())
            .load(self.conn())?;

        Ok(rows.into_iter().map(scheduled).collect())
    }

    fn find_menu_by_name(
        &mut self,
        restaurant_id: i32,
        name: &str,
    ) -> QueryResult<Option<ScheduledMenu>> {
        let row: Option<MenuWindow> = menus::table
            .filter(menus::restaurant_id.eq(restaurant_id))
            .filter(menus::name.eq(name))
            .select((menus::id, menus::name, menus::starts_at, menus::ends_at))
            .first(self.conn())
            .optional()?;

        Ok(row.map(scheduled))
    }

    fn restaurant_administrator(&mut self, restaurant_id: i32) -> QueryResult<Option<i32>> {
        restaurants::table
            .find(restaurant_id)
            .select(restaurants::administrator_id)
            .first(self.conn())
            .optional()
    }

    fn recipe_administrator(&mut self, recipe_id: i32) -> QueryResult<Option<i32>> {
        recipes::table
            .find(recipe_id)
            .select(recipes::administrator_id)
            .first(self.conn())
            .optional()
    }

    fn insert_menu(&mut self, menu: NewMenu<'_>, lines: &[MenuLine]) -> QueryResult<i32> {
        self.conn().transaction(|conn| {
            let menu_id: i32 = diesel::insert_into(menus::table)
                .values(NewMenuRow {
                    name: menu.name,
                    description: menu.description,
                    starts_at: menu.starts_at,
                    ends_at: menu.ends_at,
                    restaurant_id: menu.restaurant_id,
                    user_id: menu.user_id,
                })
                .returning(menus::id)
                .get_result(conn)?;

            // people_count is validated to at most five digits before it gets here
            let rows: Vec<NewMenuRecipe> = lines
                .iter()
                .map(|line| NewMenuRecipe {
                    menu_id,
                    recipe_id: line.recipe_id,
                    people_count: line.people_count as i32,
                })
                .collect();

            diesel::insert_into(menu_recipes::table)
                .values(&rows)
                .execute(conn)?;

            Ok(menu_id)
        })
    }
}

impl RecipeCatalog for PgStore<'_> {
    type Error = diesel::result::Error;

    fn get_recipe(&mut self, id: i32) -> QueryResult<Option<CatalogRecipe>> {
        let recipe: Option<Recipe> = recipes::table
            .find(id)
            .select(Recipe::as_select())
            .first(self.conn())
            .optional()?;

        let Some(recipe) = recipe.filter(|r| self.visible(r.administrator_id)) else {
            return Ok(None);
        };

        let lines: Vec<(i32, f64)> = recipe_ingredients::table
            .filter(recipe_ingredients::recipe_id.eq(recipe.id))
            .select((
                recipe_ingredients::ingredient_id,
                recipe_ingredients::quantity,
            ))
            .order(recipe_ingredients::id.asc())
            .load(self.conn())?;

        Ok(Some(CatalogRecipe {
            id: recipe.id,
            name: recipe.name,
            portion: recipe.portion,
            lines: lines
                .into_iter()
                .map(|(ingredient_id, quantity)| RecipeLine {
                    ingredient_id,
                    quantity,
                })
                .collect(),
        }))
    }

    fn get_ingredient(&mut self, id: i32) -> QueryResult<Option<CatalogIngredient>> {
        let ingredient: Option<Ingredient> = ingredients::table
            .find(id)
            .select(Ingredient::as_select())
            .first(self.conn())
            .optional()?;

        Ok(ingredient
            .filter(|i| self.visible(i.administrator_id))
            .map(|i| CatalogIngredient {
                id: i.id,
                name: i.name,
                unit_cost: i.unit_cost,
                site: i.site,
            }))
    }
}

//! Menu payload validation and the menu creation sequence.

use crate::actor::Actor;
use crate::error::{MenuError, ValidationError};
use crate::schedule::validate_schedule;
use crate::store::{MenuLine, MenuStore, NewMenu};
use crate::wire::{parse_id, parse_menu_people, WireNumber};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

const NAME_LENGTH: RangeInclusive<usize> = 2..=200;
const DESCRIPTION_LENGTH: RangeInclusive<usize> = 2..=2000;

/// Body of `POST /menu`.
///
/// Every field is optional at the serde level so that missing fields are
/// reported through [`ValidationError`] instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenuPayload {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD HH:MM`
    #[serde(rename = "fecha_inicio", default)]
    pub start: Option<String>,
    /// `YYYY-MM-DD HH:MM`
    #[serde(rename = "fecha_fin", default)]
    pub end: Option<String>,
    #[serde(rename = "recetas", default)]
    pub recipes: Option<Vec<MenuRecipeEntry>>,
    /// Ignored for chefs, who always create menus for their own restaurant.
    #[serde(rename = "restaurante", default)]
    pub restaurant: Option<WireNumber>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenuRecipeEntry {
    #[serde(rename = "receta", default)]
    pub recipe: Option<WireNumber>,
    #[serde(rename = "numero_personas", default)]
    pub people_count: Option<WireNumber>,
}

/// A payload that passed [`validate_menu`]. Dates are still raw; they are
/// parsed by schedule validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMenu {
    pub name: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub lines: Vec<MenuLine>,
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

/// Checks the shape of a menu payload. The first rule that fails decides the error.
pub fn validate_menu(payload: &MenuPayload) -> Result<ValidatedMenu, ValidationError> {
    let (Some(name), Some(description), Some(start), Some(end)) = (
        non_blank(&payload.name),
        non_blank(&payload.description),
        non_blank(&payload.start),
        non_blank(&payload.end),
    ) else {
        return Err(ValidationError::InvalidPayload);
    };

    if !NAME_LENGTH.contains(&name.chars().count()) {
        return Err(ValidationError::InvalidName);
    }

    if !DESCRIPTION_LENGTH.contains(&description.chars().count()) {
        return Err(ValidationError::InvalidDescription);
    }

    let entries = payload.recipes.as_deref().unwrap_or_default();
    if entries.is_empty() {
        return Err(ValidationError::EmptyRecipeList);
    }

    let recipe_ids = entries
        .iter()
        .map(|entry| entry.recipe.as_ref().and_then(parse_id))
        .collect::<Option<Vec<i32>>>()
        .ok_or(ValidationError::InvalidPayload)?;

    let mut seen = HashSet::with_capacity(recipe_ids.len());
    if !recipe_ids.iter().all(|id| seen.insert(*id)) {
        return Err(ValidationError::DuplicateRecipes);
    }

    let lines = entries
        .iter()
        .zip(recipe_ids)
        .map(|(entry, recipe_id)| {
            let people_count = entry
                .people_count
                .as_ref()
                .and_then(parse_menu_people)
                .ok_or(ValidationError::InvalidPeopleCount)?;
            Ok(MenuLine {
                recipe_id,
                people_count,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(ValidatedMenu {
        name: name.to_string(),
        description: description.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        lines,
    })
}

/// The restaurant a menu is created for.
///
/// Chefs always act on their own restaurant. Administrators must name one of
/// the restaurants they own.
fn resolve_restaurant<S: MenuStore>(
    store: &mut S,
    actor: &Actor,
    payload: &MenuPayload,
) -> Result<i32, MenuError<S::Error>> {
    match *actor {
        Actor::Chef { restaurant_id, .. } => Ok(restaurant_id),
        Actor::Administrator { id } => {
            let restaurant_id = payload
                .restaurant
                .as_ref()
                .and_then(parse_id)
                .ok_or(ValidationError::RestaurantNotSelected)?;

            match store
                .restaurant_administrator(restaurant_id)
                .map_err(MenuError::Store)?
            {
                Some(owner) if owner == id => Ok(restaurant_id),
                _ => Err(ValidationError::AccessDenied.into()),
            }
        }
    }
}

/// Validates and stores a new menu, returning its id.
///
/// Callers that need the overlap check and the insert to be atomic must run
/// this inside a serializable transaction on `store`.
pub fn create_menu<S: MenuStore>(
    store: &mut S,
    actor: &Actor,
    payload: &MenuPayload,
    now: NaiveDateTime,
) -> Result<i32, MenuError<S::Error>> {
    let restaurant_id = resolve_restaurant(store, actor, payload)?;
    let menu = validate_menu(payload)?;

    if store
        .find_menu_by_name(restaurant_id, &menu.name)
        .map_err(MenuError::Store)?
        .is_some()
    {
        return Err(ValidationError::DuplicateMenuName.into());
    }

    let schedule = validate_schedule(store, payload, restaurant_id, now)?;

    let administrator_id = actor.administrator_id();
    for line in &menu.lines {
        let owner = store
            .recipe_administrator(line.recipe_id)
            .map_err(MenuError::Store)?;
        if owner != Some(administrator_id) {
            return Err(ValidationError::UnknownRecipe.into());
        }
    }

    let id = store
        .insert_menu(
            NewMenu {
                name: &menu.name,
                description: &menu.description,
                starts_at: schedule.start,
                ends_at: schedule.end,
                restaurant_id,
                user_id: actor.user_id(),
            },
            &menu.lines,
        )
        .map_err(MenuError::Store)?;

    tracing::info!(menu_id = id, restaurant_id, recipes = menu.lines.len(), "menu created");

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(recipe: i64, people: i64) -> MenuRecipeEntry {
        MenuRecipeEntry {
            recipe: Some(WireNumber::from(recipe)),
            people_count: Some(WireNumber::from(people)),
        }
    }

    fn valid_payload() -> MenuPayload {
        MenuPayload {
            name: Some("Menú de temporada".to_string()),
            description: Some("Platos de otoño".to_string()),
            start: Some("2030-09-20 10:00".to_string()),
            end: Some("2030-09-24 12:00".to_string()),
            recipes: Some(vec![entry(1, 2), entry(2, 4)]),
            restaurant: Some(WireNumber::from(1)),
        }
    }

    #[test]
    fn test_valid_payload() {
        let menu = validate_menu(&valid_payload()).unwrap();
        assert_eq!(menu.name, "Menú de temporada");
        assert_eq!(
            menu.lines,
            vec![
                MenuLine {
                    recipe_id: 1,
                    people_count: 2
                },
                MenuLine {
                    recipe_id: 2,
                    people_count: 4
                },
            ]
        );
    }

    #[test]
    fn test_blank_fields() {
        for blank in [None, Some("   ".to_string())] {
            let mut payload = valid_payload();
            payload.description = blank.clone();
            assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidPayload));

            let mut payload = valid_payload();
            payload.end = blank;
            assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidPayload));
        }
    }

    #[test]
    fn test_name_length_boundaries() {
        let mut payload = valid_payload();
        payload.name = Some("M".to_string());
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidName));

        payload.name = Some("Mx".to_string());
        assert!(validate_menu(&payload).is_ok());

        payload.name = Some("a".repeat(200));
        assert!(validate_menu(&payload).is_ok());

        payload.name = Some("a".repeat(201));
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidName));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut payload = valid_payload();
        payload.name = Some("ñ".to_string());
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidName));

        payload.name = Some("ñá".to_string());
        assert!(validate_menu(&payload).is_ok());
    }

    #[test]
    fn test_description_length() {
        let mut payload = valid_payload();
        payload.description = Some("x".to_string());
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidDescription));

        payload.description = Some("x".repeat(2001));
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidDescription));
    }

    #[test]
    fn test_name_checked_before_description() {
        let mut payload = valid_payload();
        payload.name = Some("M".to_string());
        payload.description = Some("x".to_string());
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidName));
    }

    #[test]
    fn test_empty_and_missing_recipe_list() {
        let mut payload = valid_payload();
        payload.recipes = Some(Vec::new());
        assert_eq!(validate_menu(&payload), Err(ValidationError::EmptyRecipeList));

        payload.recipes = None;
        assert_eq!(validate_menu(&payload), Err(ValidationError::EmptyRecipeList));
    }

    #[test]
    fn test_duplicate_recipes_with_different_headcounts() {
        let mut payload = valid_payload();
        payload.recipes = Some(vec![entry(3, 2), entry(3, 40)]);
        assert_eq!(validate_menu(&payload), Err(ValidationError::DuplicateRecipes));
    }

    #[test]
    fn test_duplicate_detected_across_number_forms() {
        let mut payload = valid_payload();
        payload.recipes = Some(vec![
            entry(3, 2),
            MenuRecipeEntry {
                recipe: Some(WireNumber::from("3")),
                people_count: Some(WireNumber::from(5)),
            },
        ]);
        assert_eq!(validate_menu(&payload), Err(ValidationError::DuplicateRecipes));
    }

    #[test]
    fn test_duplicates_reported_before_bad_headcount() {
        let mut payload = valid_payload();
        payload.recipes = Some(vec![entry(3, 0), entry(3, 2)]);
        assert_eq!(validate_menu(&payload), Err(ValidationError::DuplicateRecipes));
    }

    #[test]
    fn test_unreadable_recipe_reference() {
        let mut payload = valid_payload();
        payload.recipes = Some(vec![MenuRecipeEntry {
            recipe: Some(WireNumber::from("sopa")),
            people_count: Some(WireNumber::from(2)),
        }]);
        assert_eq!(validate_menu(&payload), Err(ValidationError::InvalidPayload));
    }

    #[test]
    fn test_people_count_rules() {
        for bad in [
            Some(WireNumber::from(0)),
            Some(WireNumber::from(-4)),
            Some(WireNumber::from(123_456)),
            Some(WireNumber::from("dos")),
            None,
        ] {
            let mut payload = valid_payload();
            payload.recipes = Some(vec![MenuRecipeEntry {
                recipe: Some(WireNumber::from(1)),
                people_count: bad,
            }]);
            assert_eq!(
                validate_menu(&payload),
                Err(ValidationError::InvalidPeopleCount)
            );
        }

        let mut payload = valid_payload();
        payload.recipes = Some(vec![MenuRecipeEntry {
            recipe: Some(WireNumber::from(1)),
            people_count: Some(WireNumber::from("99999")),
        }]);
        assert!(validate_menu(&payload).is_ok());
    }
}

//! The authenticated caller, resolved once per request.

/// Who is acting on a request.
///
/// Chefs carry the restaurant they work at and that restaurant's administrator,
/// since ingredients and recipes are owned by the administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Administrator {
        id: i32,
    },
    Chef {
        id: i32,
        restaurant_id: i32,
        administrator_id: i32,
    },
}

impl Actor {
    pub fn user_id(&self) -> i32 {
        match *self {
            Actor::Administrator { id } | Actor::Chef { id, .. } => id,
        }
    }

    /// The administrator whose ingredients and recipes this actor works with.
    pub fn administrator_id(&self) -> i32 {
        match *self {
            Actor::Administrator { id } => id,
            Actor::Chef {
                administrator_id, ..
            } => administrator_id,
        }
    }

    /// Returns the id only when the actor is an administrator.
    pub fn as_administrator(&self) -> Option<i32> {
        match *self {
            Actor::Administrator { id } => Some(id),
            Actor::Chef { .. } => None,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Actor::Administrator { .. } => "admin",
            Actor::Chef { .. } => "chef",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chef_resolves_to_restaurant_administrator() {
        let chef = Actor::Chef {
            id: 7,
            restaurant_id: 3,
            administrator_id: 1,
        };
        assert_eq!(chef.user_id(), 7);
        assert_eq!(chef.administrator_id(), 1);
        assert_eq!(chef.as_administrator(), None);
        assert_eq!(chef.role(), "chef");
    }

    #[test]
    fn test_administrator_is_its_own_owner() {
        let admin = Actor::Administrator { id: 4 };
        assert_eq!(admin.user_id(), 4);
        assert_eq!(admin.administrator_id(), 4);
        assert_eq!(admin.as_administrator(), Some(4));
        assert_eq!(admin.role(), "admin");
    }
}

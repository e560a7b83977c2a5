use chrono::{Duration, Utc};
use cocina_core::Actor;
use diesel::prelude::*;
use diesel::r2d2::PoolError;
use thiserror::Error;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{NewSession, ROLE_ADMIN, ROLE_CHEF};
use crate::schema::{chefs, restaurants, sessions, users};

use super::crypto::{generate_token, hash_token};

/// How long a freshly issued session token stays valid.
#[derive(Debug, Clone, Copy)]
pub struct SessionTtl(pub Duration);

impl SessionTtl {
    pub fn days(days: i64) -> Self {
        Self(Duration::days(days))
    }
}

pub fn create_session(
    conn: &mut PgConnection,
    user_id: i32,
    ttl: SessionTtl,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);

    let new_session = NewSession {
        id: Uuid::new_v4(),
        user_id,
        token_hash: &token_hash,
        expires_at: Utc::now() + ttl.0,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Builds the actor for a user row. Chefs whose chef record is gone resolve
/// to `None`.
pub fn resolve_actor(
    conn: &mut PgConnection,
    user_id: i32,
    role: &str,
) -> QueryResult<Option<Actor>> {
    match role {
        ROLE_ADMIN => Ok(Some(Actor::Administrator { id: user_id })),
        ROLE_CHEF => {
            let placement: Option<(i32, i32)> = chefs::table
                .inner_join(restaurants::table)
                .filter(chefs::user_id.eq(user_id))
                .select((chefs::restaurant_id, restaurants::administrator_id))
                .first(conn)
                .optional()?;

            Ok(placement.map(|(restaurant_id, administrator_id)| Actor::Chef {
                id: user_id,
                restaurant_id,
                administrator_id,
            }))
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Error)]
pub enum SessionLookupError {
    #[error("database connection unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error("session query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Actor behind an unexpired session token. `Ok(None)` means the token is
/// unknown or expired.
pub async fn get_actor_from_token(
    pool: &DbPool,
    token: &str,
) -> Result<Option<Actor>, SessionLookupError> {
    let mut conn = pool.get()?;
    let token_hash = hash_token(token);

    let session: Option<(i32, String)> = sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select((users::id, users::role))
        .first(&mut conn)
        .optional()?;

    match session {
        Some((user_id, role)) => Ok(resolve_actor(&mut conn, user_id, &role)?),
        None => Ok(None),
    }
}

mod crypto;
mod db;
mod extractor;

pub use crypto::{hash_password, verify_password};
pub use db::{create_session, resolve_actor, SessionTtl};
pub use extractor::AuthUser;

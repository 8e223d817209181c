//! Repository implementations
//!
//! Repositories own the SQL. They map between table rows and plain row
//! structs; the adapters in [`crate::adapters`] turn those rows into domain
//! types.
//!
//! Queries are checked at runtime (`sqlx::query_as` with `FromRow`), so the
//! workspace builds without a live database.

pub mod claims;
pub mod users;

pub use claims::ClaimsRepository;
pub use users::UsersRepository;

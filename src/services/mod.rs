// Service exports
pub mod auth;
pub mod supabase;

pub use auth::{AuthError, Authorizer, Claims, JwtAuthorizer};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};

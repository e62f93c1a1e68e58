pub mod jwt_provider;
pub mod providers;
pub mod static_provider;
pub mod supabase_provider;

// Re-export from providers.rs so we can do "use crate::providers::*;"
pub use providers::*;

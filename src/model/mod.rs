pub mod ids;
pub mod user;
pub mod contact;

// Re-exports for convenience
pub use ids::Id;
pub use user::User;
pub use contact::{ContactDraft, ContactRecord};

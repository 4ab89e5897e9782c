use uuid::Uuid;

pub mod offer;
pub mod product;

// Re-exports for convenience
pub use offer::*;
pub use product::*;

/// Fresh opaque identifier. Carries no state between calls.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

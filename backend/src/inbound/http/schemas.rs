//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here mirror them in the adapter layer for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::UserType`].
#[derive(ToSchema)]
#[schema(as = UserType)]
pub enum UserTypeSchema {
    /// Interested in funding ideas.
    #[schema(rename = "investor")]
    Investor,
    /// Brings an idea; `ideaCategory` is required.
    #[schema(rename = "idea_owner")]
    IdeaOwner,
    /// Anyone else.
    #[schema(rename = "general")]
    General,
}

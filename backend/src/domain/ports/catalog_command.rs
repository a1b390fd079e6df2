//! Driving port for catalog mutations.
//!
//! Covers tags, ingredients, and recipes. Every operation is scoped to the
//! owning account; adapters never see another account's records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AccountId, CatalogName, Error, Ingredient, Recipe, RecipeChanges, RecipeDraft, Tag,
};

/// Domain use-case port for catalog mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Create a tag owned by the given account.
    async fn create_tag(&self, owner: AccountId, name: CatalogName) -> Result<Tag, Error>;

    /// Create an ingredient owned by the given account.
    async fn create_ingredient(
        &self,
        owner: AccountId,
        name: CatalogName,
    ) -> Result<Ingredient, Error>;

    /// Create a recipe owned by the given account.
    ///
    /// Referenced tag and ingredient ids must exist.
    async fn create_recipe(&self, owner: AccountId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Apply a partial update to one of the account's recipes.
    async fn revise_recipe(
        &self,
        owner: AccountId,
        recipe_id: Uuid,
        changes: RecipeChanges,
    ) -> Result<Recipe, Error>;

    /// Replace every field of one of the account's recipes.
    async fn replace_recipe(
        &self,
        owner: AccountId,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error>;

    /// Delete one of the account's recipes.
    async fn delete_recipe(&self, owner: AccountId, recipe_id: Uuid) -> Result<(), Error>;
}

//! Port abstraction for catalog persistence adapters.
//!
//! Every query that can leak data across accounts takes the owner as a
//! parameter, so an unscoped listing is unrepresentable at the call site.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::account::AccountId;
use crate::domain::catalog::{Ingredient, Recipe, Tag};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by catalog repository adapters.
    pub enum CatalogRepositoryError {
        /// Query or mutation failed during execution.
        Query { message: String } => "catalog repository query failed: {message}",
    }
}

/// Driven port for tag, ingredient, and recipe storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a new tag.
    async fn insert_tag(&self, tag: &Tag) -> Result<(), CatalogRepositoryError>;

    /// List an account's tags ordered by name descending.
    async fn list_tags_for(&self, owner: AccountId) -> Result<Vec<Tag>, CatalogRepositoryError>;

    /// Fetch the tags matching `ids`, in input order, skipping unknown ids.
    async fn find_tags_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, CatalogRepositoryError>;

    /// Insert a new ingredient.
    async fn insert_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), CatalogRepositoryError>;

    /// List an account's ingredients ordered by name descending.
    async fn list_ingredients_for(
        &self,
        owner: AccountId,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError>;

    /// Fetch the ingredients matching `ids`, in input order, skipping unknown ids.
    async fn find_ingredients_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError>;

    /// Insert a new recipe.
    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), CatalogRepositoryError>;

    /// Persist changes to an existing recipe.
    async fn update_recipe(&self, recipe: &Recipe) -> Result<(), CatalogRepositoryError>;

    /// Delete an account's recipe; returns `false` when no such recipe exists
    /// for that owner.
    async fn delete_recipe(
        &self,
        owner: AccountId,
        id: Uuid,
    ) -> Result<bool, CatalogRepositoryError>;

    /// List an account's recipes in insertion order.
    async fn list_recipes_for(
        &self,
        owner: AccountId,
    ) -> Result<Vec<Recipe>, CatalogRepositoryError>;

    /// Fetch one of an account's recipes by id.
    async fn find_recipe_for(
        &self,
        owner: AccountId,
        id: Uuid,
    ) -> Result<Option<Recipe>, CatalogRepositoryError>;
}

//! Driving port for catalog reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AccountId, Error, Ingredient, Recipe, RecipeDetail, Tag};

/// Domain use-case port for reading an account's catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// List the account's tags ordered by name, descending.
    async fn list_tags(&self, owner: AccountId) -> Result<Vec<Tag>, Error>;

    /// List the account's ingredients ordered by name, descending.
    async fn list_ingredients(&self, owner: AccountId) -> Result<Vec<Ingredient>, Error>;

    /// List the account's recipes in creation order.
    async fn list_recipes(&self, owner: AccountId) -> Result<Vec<Recipe>, Error>;

    /// Fetch one of the account's recipes with its tags and ingredients
    /// resolved.
    async fn recipe_detail(&self, owner: AccountId, recipe_id: Uuid) -> Result<RecipeDetail, Error>;
}

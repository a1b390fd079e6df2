//! Catalog domain service for tags, ingredients, and recipes.
//!
//! Implements the catalog driving ports over the catalog repository. Recipe
//! attachments are validated for existence here so unknown ids surface as a
//! client error rather than dangling references in storage.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{CatalogCommand, CatalogQuery, CatalogRepository, CatalogRepositoryError};
use crate::domain::{
    AccountId, CatalogName, Error, Ingredient, Recipe, RecipeChanges, RecipeDetail, RecipeDraft,
    Tag,
};

fn map_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

fn unknown_reference_error(field: &str, missing: &[Uuid]) -> Error {
    Error::invalid_request(format!("one or more referenced {field} do not exist")).with_details(
        json!({
            "field": field,
            "code": "unknown_id",
            "ids": missing,
        }),
    )
}

fn recipe_not_found(recipe_id: Uuid) -> Error {
    Error::not_found(format!("recipe {recipe_id} not found"))
}

fn missing_from(requested: &[Uuid], known: &[Uuid]) -> Vec<Uuid> {
    let mut missing = Vec::new();
    for id in requested {
        if !known.contains(id) && !missing.contains(id) {
            missing.push(*id);
        }
    }
    missing
}

/// Catalog service implementing the catalog driving ports.
#[derive(Clone)]
pub struct CatalogService<R> {
    catalog: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CatalogService<R> {
    /// Create a new service over the catalog repository.
    pub fn new(catalog: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }
}

impl<R> CatalogService<R>
where
    R: CatalogRepository,
{
    async fn require_recipe(&self, owner: AccountId, recipe_id: Uuid) -> Result<Recipe, Error> {
        self.catalog
            .find_recipe_for(owner, recipe_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| recipe_not_found(recipe_id))
    }

    async fn ensure_tags_exist(&self, ids: &[Uuid]) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }
        let found = self
            .catalog
            .find_tags_by_ids(ids)
            .await
            .map_err(map_repository_error)?;
        let known: Vec<Uuid> = found.iter().map(Tag::id).collect();
        let missing = missing_from(ids, &known);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(unknown_reference_error("tags", &missing))
        }
    }

    async fn ensure_ingredients_exist(&self, ids: &[Uuid]) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }
        let found = self
            .catalog
            .find_ingredients_by_ids(ids)
            .await
            .map_err(map_repository_error)?;
        let known: Vec<Uuid> = found.iter().map(Ingredient::id).collect();
        let missing = missing_from(ids, &known);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(unknown_reference_error("ingredients", &missing))
        }
    }
}

#[async_trait]
impl<R> CatalogCommand for CatalogService<R>
where
    R: CatalogRepository,
{
    async fn create_tag(&self, owner: AccountId, name: CatalogName) -> Result<Tag, Error> {
        let tag = Tag::new(Uuid::new_v4(), owner, name, self.clock.utc());
        self.catalog
            .insert_tag(&tag)
            .await
            .map_err(map_repository_error)?;
        Ok(tag)
    }

    async fn create_ingredient(
        &self,
        owner: AccountId,
        name: CatalogName,
    ) -> Result<Ingredient, Error> {
        let ingredient = Ingredient::new(Uuid::new_v4(), owner, name, self.clock.utc());
        self.catalog
            .insert_ingredient(&ingredient)
            .await
            .map_err(map_repository_error)?;
        Ok(ingredient)
    }

    async fn create_recipe(&self, owner: AccountId, draft: RecipeDraft) -> Result<Recipe, Error> {
        self.ensure_tags_exist(&draft.tags).await?;
        self.ensure_ingredients_exist(&draft.ingredients).await?;
        let recipe = Recipe::new(Uuid::new_v4(), owner, draft, self.clock.utc());
        self.catalog
            .insert_recipe(&recipe)
            .await
            .map_err(map_repository_error)?;
        Ok(recipe)
    }

    async fn revise_recipe(
        &self,
        owner: AccountId,
        recipe_id: Uuid,
        changes: RecipeChanges,
    ) -> Result<Recipe, Error> {
        let mut recipe = self.require_recipe(owner, recipe_id).await?;
        if let Some(tags) = &changes.tags {
            self.ensure_tags_exist(tags).await?;
        }
        if let Some(ingredients) = &changes.ingredients {
            self.ensure_ingredients_exist(ingredients).await?;
        }
        recipe.apply(changes);
        self.catalog
            .update_recipe(&recipe)
            .await
            .map_err(map_repository_error)?;
        Ok(recipe)
    }

    async fn replace_recipe(
        &self,
        owner: AccountId,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error> {
        let existing = self.require_recipe(owner, recipe_id).await?;
        self.ensure_tags_exist(&draft.tags).await?;
        self.ensure_ingredients_exist(&draft.ingredients).await?;
        let recipe = Recipe::new(recipe_id, owner, draft, existing.created_at());
        self.catalog
            .update_recipe(&recipe)
            .await
            .map_err(map_repository_error)?;
        Ok(recipe)
    }

    async fn delete_recipe(&self, owner: AccountId, recipe_id: Uuid) -> Result<(), Error> {
        let deleted = self
            .catalog
            .delete_recipe(owner, recipe_id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(recipe_not_found(recipe_id))
        }
    }
}

#[async_trait]
impl<R> CatalogQuery for CatalogService<R>
where
    R: CatalogRepository,
{
    async fn list_tags(&self, owner: AccountId) -> Result<Vec<Tag>, Error> {
        self.catalog
            .list_tags_for(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn list_ingredients(&self, owner: AccountId) -> Result<Vec<Ingredient>, Error> {
        self.catalog
            .list_ingredients_for(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn list_recipes(&self, owner: AccountId) -> Result<Vec<Recipe>, Error> {
        self.catalog
            .list_recipes_for(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn recipe_detail(&self, owner: AccountId, recipe_id: Uuid) -> Result<RecipeDetail, Error> {
        let recipe = self.require_recipe(owner, recipe_id).await?;
        let tags = self
            .catalog
            .find_tags_by_ids(recipe.tags())
            .await
            .map_err(map_repository_error)?;
        let ingredients = self
            .catalog
            .find_ingredients_by_ids(recipe.ingredients())
            .await
            .map_err(map_repository_error)?;
        Ok(RecipeDetail {
            recipe,
            tags,
            ingredients,
        })
    }
}

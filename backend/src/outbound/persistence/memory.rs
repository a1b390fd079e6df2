//! In-memory store implementing every repository port.
//!
//! Records live in plain vectors behind one `RwLock`, so insertion order is
//! the natural ordering and listings that need another order sort on the way
//! out. A poisoned lock is reported as a query error instead of a panic.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, CatalogRepository, CatalogRepositoryError,
    TokenRepository, TokenRepositoryError,
};
use crate::domain::{
    Account, AccountId, AuthToken, EmailAddress, Ingredient, Recipe, Tag, TokenDigest,
};

#[derive(Default)]
struct StoreState {
    accounts: Vec<Account>,
    tokens: Vec<AuthToken>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
}

/// Single-process store backing all repository ports.
///
/// Share one instance across the repositories of a running server; separate
/// instances would give each port its own disconnected universe.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, &'static str> {
        self.state.read().map_err(|_| "store lock poisoned")
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, &'static str> {
        self.state.write().map_err(|_| "store lock poisoned")
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut state = self.write().map_err(AccountRepositoryError::query)?;
        if state
            .accounts
            .iter()
            .any(|stored| stored.email() == account.email())
        {
            return Err(AccountRepositoryError::duplicate_email(
                account.email().as_str(),
            ));
        }
        state.accounts.push(account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut state = self.write().map_err(AccountRepositoryError::query)?;
        let Some(slot) = state
            .accounts
            .iter_mut()
            .find(|stored| stored.id() == account.id())
        else {
            return Err(AccountRepositoryError::query(format!(
                "no stored account with id {}",
                account.id()
            )));
        };
        *slot = account.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let state = self.read().map_err(AccountRepositoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .find(|stored| stored.id() == id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let state = self.read().map_err(AccountRepositoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .find(|stored| stored.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let state = self.read().map_err(AccountRepositoryError::query)?;
        let mut accounts = state.accounts.clone();
        accounts.sort_by_key(|account| (account.joined_at(), account.id()));
        Ok(accounts)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn put(&self, token: &AuthToken) -> Result<(), TokenRepositoryError> {
        let mut state = self.write().map_err(TokenRepositoryError::query)?;
        state
            .tokens
            .retain(|stored| stored.account_id() != token.account_id());
        state.tokens.push(token.clone());
        Ok(())
    }

    async fn find_account_by_digest(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<AccountId>, TokenRepositoryError> {
        let state = self.read().map_err(TokenRepositoryError::query)?;
        Ok(state
            .tokens
            .iter()
            .find(|stored| stored.digest() == digest)
            .map(AuthToken::account_id))
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn insert_tag(&self, tag: &Tag) -> Result<(), CatalogRepositoryError> {
        let mut state = self.write().map_err(CatalogRepositoryError::query)?;
        state.tags.push(tag.clone());
        Ok(())
    }

    async fn list_tags_for(&self, owner: AccountId) -> Result<Vec<Tag>, CatalogRepositoryError> {
        let state = self.read().map_err(CatalogRepositoryError::query)?;
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|tag| tag.owner() == owner)
            .cloned()
            .collect();
        tags.sort_by(|a, b| b.name().cmp(a.name()));
        Ok(tags)
    }

    async fn find_tags_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, CatalogRepositoryError> {
        let state = self.read().map_err(CatalogRepositoryError::query)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.tags.iter().find(|tag| tag.id() == *id).cloned())
            .collect())
    }

    async fn insert_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), CatalogRepositoryError> {
        let mut state = self.write().map_err(CatalogRepositoryError::query)?;
        state.ingredients.push(ingredient.clone());
        Ok(())
    }

    async fn list_ingredients_for(
        &self,
        owner: AccountId,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        let state = self.read().map_err(CatalogRepositoryError::query)?;
        let mut ingredients: Vec<Ingredient> = state
            .ingredients
            .iter()
            .filter(|ingredient| ingredient.owner() == owner)
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| b.name().cmp(a.name()));
        Ok(ingredients)
    }

    async fn find_ingredients_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        let state = self.read().map_err(CatalogRepositoryError::query)?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                state
                    .ingredients
                    .iter()
                    .find(|ingredient| ingredient.id() == *id)
                    .cloned()
            })
            .collect())
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), CatalogRepositoryError> {
        let mut state = self.write().map_err(CatalogRepositoryError::query)?;
        state.recipes.push(recipe.clone());
        Ok(())
    }

    async fn update_recipe(&self, recipe: &Recipe) -> Result<(), CatalogRepositoryError> {
        let mut state = self.write().map_err(CatalogRepositoryError::query)?;
        let Some(slot) = state
            .recipes
            .iter_mut()
            .find(|stored| stored.id() == recipe.id())
        else {
            return Err(CatalogRepositoryError::query(format!(
                "no stored recipe with id {}",
                recipe.id()
            )));
        };
        *slot = recipe.clone();
        Ok(())
    }

    async fn delete_recipe(
        &self,
        owner: AccountId,
        id: Uuid,
    ) -> Result<bool, CatalogRepositoryError> {
        let mut state = self.write().map_err(CatalogRepositoryError::query)?;
        let before = state.recipes.len();
        state
            .recipes
            .retain(|stored| !(stored.owner() == owner && stored.id() == id));
        Ok(state.recipes.len() != before)
    }

    async fn list_recipes_for(
        &self,
        owner: AccountId,
    ) -> Result<Vec<Recipe>, CatalogRepositoryError> {
        let state = self.read().map_err(CatalogRepositoryError::query)?;
        Ok(state
            .recipes
            .iter()
            .filter(|recipe| recipe.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_recipe_for(
        &self,
        owner: AccountId,
        id: Uuid,
    ) -> Result<Option<Recipe>, CatalogRepositoryError> {
        let state = self.read().map_err(CatalogRepositoryError::query)?;
        Ok(state
            .recipes
            .iter()
            .find(|recipe| recipe.owner() == owner && recipe.id() == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogName, PasswordHash, Price, RecipeDraft};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn account(raw_email: &str) -> Account {
        Account::new(
            AccountId::random(),
            EmailAddress::parse(raw_email).expect("valid email"),
            None,
            PasswordHash::from_phc("$argon2id$stub"),
            Utc::now(),
        )
    }

    fn account_joined_at(raw_email: &str, joined_at: chrono::DateTime<Utc>) -> Account {
        Account::new(
            AccountId::random(),
            EmailAddress::parse(raw_email).expect("valid email"),
            None,
            PasswordHash::from_phc("$argon2id$stub"),
            joined_at,
        )
    }

    fn tag(owner: AccountId, name: &str) -> Tag {
        Tag::new(
            Uuid::new_v4(),
            owner,
            CatalogName::new(name).expect("valid name"),
            Utc::now(),
        )
    }

    fn ingredient(owner: AccountId, name: &str) -> Ingredient {
        Ingredient::new(
            Uuid::new_v4(),
            owner,
            CatalogName::new(name).expect("valid name"),
            Utc::now(),
        )
    }

    fn recipe(owner: AccountId, title: &str) -> Recipe {
        Recipe::new(
            Uuid::new_v4(),
            owner,
            RecipeDraft {
                title: CatalogName::new(title).expect("valid title"),
                time_minutes: 10,
                price: Price::new(Decimal::new(500, 2)).expect("valid price"),
                tags: Vec::new(),
                ingredients: Vec::new(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_rejects_a_duplicate_normalised_email() {
        let store = MemoryStore::new();
        store
            .insert(&account("Cook@EXAMPLE.com"))
            .await
            .expect("first insert");

        let error = store
            .insert(&account("Cook@example.com"))
            .await
            .expect_err("same normalised email");
        assert!(matches!(
            error,
            AccountRepositoryError::DuplicateEmail { .. }
        ));

        // A differently cased local part is a distinct address.
        store
            .insert(&account("cook@example.com"))
            .await
            .expect("distinct local part");
    }

    #[tokio::test]
    async fn list_orders_accounts_by_join_time_then_id() {
        let store = MemoryStore::new();
        let older = account_joined_at("first@example.com", Utc::now() - Duration::minutes(10));
        let newer = account_joined_at("second@example.com", Utc::now());
        store.insert(&newer).await.expect("insert newer");
        store.insert(&older).await.expect("insert older");

        let listed = store.list().await.expect("list accounts");
        let emails: Vec<&str> = listed.iter().map(|a| a.email().as_str()).collect();
        assert_eq!(emails, ["first@example.com", "second@example.com"]);
    }

    #[tokio::test]
    async fn update_replaces_the_stored_account() {
        let store = MemoryStore::new();
        let mut stored = account("cook@example.com");
        store.insert(&stored).await.expect("insert");

        stored.set_is_active(false);
        store.update(&stored).await.expect("update");

        let found = store
            .find_by_id(stored.id())
            .await
            .expect("lookup")
            .expect("account exists");
        assert!(!found.is_active());
    }

    #[tokio::test]
    async fn update_of_an_unknown_account_is_a_query_error() {
        let store = MemoryStore::new();
        let error = store
            .update(&account("ghost@example.com"))
            .await
            .expect_err("nothing stored");
        assert!(matches!(error, AccountRepositoryError::Query { .. }));
    }

    #[tokio::test]
    async fn put_replaces_the_previous_token_for_the_account() {
        let store = MemoryStore::new();
        let account_id = AccountId::random();
        let old = AuthToken::new(account_id, TokenDigest::of("old-token"), Utc::now());
        let new = AuthToken::new(account_id, TokenDigest::of("new-token"), Utc::now());

        store.put(&old).await.expect("store old token");
        store.put(&new).await.expect("store new token");

        let by_old = store
            .find_account_by_digest(&TokenDigest::of("old-token"))
            .await
            .expect("lookup old");
        assert_eq!(by_old, None);

        let by_new = store
            .find_account_by_digest(&TokenDigest::of("new-token"))
            .await
            .expect("lookup new");
        assert_eq!(by_new, Some(account_id));
    }

    #[tokio::test]
    async fn tags_are_listed_per_owner_in_descending_name_order() {
        let store = MemoryStore::new();
        let owner = AccountId::random();
        let other = AccountId::random();
        store.insert_tag(&tag(owner, "Dessert")).await.expect("tag");
        store.insert_tag(&tag(owner, "Vegan")).await.expect("tag");
        store.insert_tag(&tag(other, "Zesty")).await.expect("tag");

        let listed = store.list_tags_for(owner).await.expect("list tags");
        let names: Vec<&str> = listed.iter().map(|t| t.name().as_str()).collect();
        assert_eq!(names, ["Vegan", "Dessert"]);
    }

    #[tokio::test]
    async fn find_tags_by_ids_preserves_request_order_and_skips_unknown_ids() {
        let store = MemoryStore::new();
        let owner = AccountId::random();
        let first = tag(owner, "Vegan");
        let second = tag(owner, "Dessert");
        store.insert_tag(&first).await.expect("tag");
        store.insert_tag(&second).await.expect("tag");

        let found = store
            .find_tags_by_ids(&[second.id(), Uuid::new_v4(), first.id()])
            .await
            .expect("lookup");
        let ids: Vec<Uuid> = found.iter().map(Tag::id).collect();
        assert_eq!(ids, [second.id(), first.id()]);
    }

    #[tokio::test]
    async fn ingredients_are_listed_per_owner_in_descending_name_order() {
        let store = MemoryStore::new();
        let owner = AccountId::random();
        store
            .insert_ingredient(&ingredient(owner, "Kale"))
            .await
            .expect("ingredient");
        store
            .insert_ingredient(&ingredient(owner, "Turmeric"))
            .await
            .expect("ingredient");

        let listed = store
            .list_ingredients_for(owner)
            .await
            .expect("list ingredients");
        let names: Vec<&str> = listed.iter().map(|i| i.name().as_str()).collect();
        assert_eq!(names, ["Turmeric", "Kale"]);
    }

    #[tokio::test]
    async fn recipes_keep_insertion_order_and_stay_owner_scoped() {
        let store = MemoryStore::new();
        let owner = AccountId::random();
        let other = AccountId::random();
        let first = recipe(owner, "Lentil soup");
        let second = recipe(owner, "Dal");
        store.insert_recipe(&first).await.expect("recipe");
        store.insert_recipe(&second).await.expect("recipe");
        store
            .insert_recipe(&recipe(other, "Intruder pie"))
            .await
            .expect("recipe");

        let listed = store.list_recipes_for(owner).await.expect("list recipes");
        let titles: Vec<&str> = listed.iter().map(|r| r.title().as_str()).collect();
        assert_eq!(titles, ["Lentil soup", "Dal"]);

        let found = store
            .find_recipe_for(other, first.id())
            .await
            .expect("scoped lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_recipe_is_scoped_to_the_owner() {
        let store = MemoryStore::new();
        let owner = AccountId::random();
        let other = AccountId::random();
        let stored = recipe(owner, "Lentil soup");
        store.insert_recipe(&stored).await.expect("recipe");

        let foreign = store
            .delete_recipe(other, stored.id())
            .await
            .expect("foreign delete");
        assert!(!foreign);

        let owned = store
            .delete_recipe(owner, stored.id())
            .await
            .expect("owned delete");
        assert!(owned);

        let listed = store.list_recipes_for(owner).await.expect("list recipes");
        assert!(listed.is_empty());
    }
}

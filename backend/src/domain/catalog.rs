//! Catalog data model: tags, ingredients, and recipes.
//!
//! Every catalog entity is owned by exactly one account. Queries are always
//! scoped by owner; the entities themselves only record who owns them.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::AccountId;

/// Validation errors raised while constructing catalog value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Name exceeds the storage limit.
    NameTooLong { max: usize },
    /// Price carries a negative sign.
    NegativePrice,
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::NegativePrice => write!(f, "price must not be negative"),
        }
    }
}

impl std::error::Error for CatalogValidationError {}

/// Maximum allowed length for catalog names and recipe titles.
pub const CATALOG_NAME_MAX: usize = 255;

/// Trimmed, non-empty label naming a tag, ingredient, or recipe.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogName(String);

impl CatalogName {
    /// Validate and construct a [`CatalogName`].
    ///
    /// Surrounding whitespace is dropped before the emptiness check, so a
    /// name of spaces is rejected rather than stored invisibly.
    pub fn new(name: impl AsRef<str>) -> Result<Self, CatalogValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::EmptyName);
        }
        if trimmed.chars().count() > CATALOG_NAME_MAX {
            return Err(CatalogValidationError::NameTooLong {
                max: CATALOG_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Stored label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CatalogName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CatalogName> for String {
    fn from(value: CatalogName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CatalogName {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative decimal cost of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Validate and construct a [`Price`].
    pub fn new(value: Decimal) -> Result<Self, CatalogValidationError> {
        if value.is_sign_negative() {
            return Err(CatalogValidationError::NegativePrice);
        }
        Ok(Self(value))
    }

    /// Access the underlying decimal.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = CatalogValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Reusable label an account attaches to recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    id: Uuid,
    owner: AccountId,
    name: CatalogName,
    created_at: DateTime<Utc>,
}

impl Tag {
    /// Build a new tag.
    pub fn new(id: Uuid, owner: AccountId, name: CatalogName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            name,
            created_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning account.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Label text.
    pub fn name(&self) -> &CatalogName {
        &self.name
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ingredient an account lists for use in recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    id: Uuid,
    owner: AccountId,
    name: CatalogName,
    created_at: DateTime<Utc>,
}

impl Ingredient {
    /// Build a new ingredient.
    pub fn new(id: Uuid, owner: AccountId, name: CatalogName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            name,
            created_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning account.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Label text.
    pub fn name(&self) -> &CatalogName {
        &self.name
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Recipe with attached tag and ingredient references.
///
/// ## Invariants
/// - `owner` is immutable after creation.
/// - `tags` and `ingredients` hold de-duplicated ids in attachment order;
///   referenced entities must exist but may belong to any account.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: Uuid,
    owner: AccountId,
    title: CatalogName,
    time_minutes: u32,
    price: Price,
    tags: Vec<Uuid>,
    ingredients: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a new recipe from a validated draft.
    pub fn new(
        id: Uuid,
        owner: AccountId,
        draft: RecipeDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        let RecipeDraft {
            title,
            time_minutes,
            price,
            tags,
            ingredients,
        } = draft;
        Self {
            id,
            owner,
            title,
            time_minutes,
            price,
            tags: dedup_ids(tags),
            ingredients: dedup_ids(ingredients),
            created_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning account.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Recipe title.
    pub fn title(&self) -> &CatalogName {
        &self.title
    }

    /// Estimated preparation time in minutes.
    pub fn time_minutes(&self) -> u32 {
        self.time_minutes
    }

    /// Estimated cost.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Attached tag ids in attachment order.
    pub fn tags(&self) -> &[Uuid] {
        &self.tags
    }

    /// Attached ingredient ids in attachment order.
    pub fn ingredients(&self) -> &[Uuid] {
        &self.ingredients
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply a partial update; absent fields are left untouched.
    pub fn apply(&mut self, changes: RecipeChanges) {
        let RecipeChanges {
            title,
            time_minutes,
            price,
            tags,
            ingredients,
        } = changes;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(time_minutes) = time_minutes {
            self.time_minutes = time_minutes;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(tags) = tags {
            self.tags = dedup_ids(tags);
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = dedup_ids(ingredients);
        }
    }
}

fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Validated inputs for creating a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: CatalogName,
    pub time_minutes: u32,
    pub price: Price,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

/// Validated partial update for a recipe; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeChanges {
    pub title: Option<CatalogName>,
    pub time_minutes: Option<u32>,
    pub price: Option<Price>,
    pub tags: Option<Vec<Uuid>>,
    pub ingredients: Option<Vec<Uuid>>,
}

/// Recipe joined with the full entities its id sets reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Ingredient {
    /// Name of the ingredient
    pub name: String,
    /// Color used to draw the ingredient
    pub color: String,
    /// Number of parts of the ingredient in the drink
    pub parts: u32,
}

/// Drink as persisted in the store
#[derive(Debug, Clone, PartialEq)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Ingredient without its name
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Public representation of a drink
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full representation of a drink, including ingredient names
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct LongDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    pub fn long(&self) -> LongDrink {
        LongDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

/// Request body for creating or updating a drink.
///
/// Both fields are required on create. On update, absent or null fields keep
/// their current value.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Default)]
pub struct DrinkPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Vec<Ingredient>>,
}

/// Response for listing, creating and updating drinks
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// Response for deleting a drink
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct DeletedResponse {
    pub success: bool,
    /// Identifier of the deleted drink
    pub deleted: i64,
}

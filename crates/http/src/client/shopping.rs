//! Shopping list API client methods

use super::{AuthenticatedHttpClient, ClientError};
use crate::types::{ShoppingItem, ShoppingItemCreate, ShoppingItemUpdate};

impl AuthenticatedHttpClient {
    /// Add an entry to the shopping list
    pub async fn add_shopping_item(&self, name: &str) -> Result<ShoppingItem, ClientError> {
        let item = ShoppingItemCreate {
            name: name.to_string(),
        };
        self.post("/shopping/", &item).await
    }

    pub async fn list_shopping_items(&self) -> Result<Vec<ShoppingItem>, ClientError> {
        self.get("/shopping/").await
    }

    /// Tick or untick an entry
    pub async fn set_shopping_item_checked(
        &self,
        id: i64,
        checked: bool,
    ) -> Result<ShoppingItem, ClientError> {
        self.patch(&format!("/shopping/{id}"), &ShoppingItemUpdate { checked })
            .await
    }

    /// Remove an entry, returning it as it was stored
    pub async fn remove_shopping_item(&self, id: i64) -> Result<ShoppingItem, ClientError> {
        self.delete(&format!("/shopping/{id}")).await
    }
}

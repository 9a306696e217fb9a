//! [`ActorEntity`] implementation for [`MenuItem`].

use super::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemPatch};
use async_trait::async_trait;
use tableside_actor::ActorEntity;

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemPatch;
    /// Whether availability actually flipped.
    type Change = bool;
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        if params.name.trim().is_empty() {
            return Err(MenuError::Invalid("name must not be empty".to_string()));
        }
        if let Some(dup) = params
            .options
            .iter()
            .enumerate()
            .find(|(i, o)| params.options[..*i].iter().any(|p| p.slug == o.slug))
            .map(|(_, o)| o.slug.clone())
        {
            return Err(MenuError::Invalid(format!("duplicate option `{dup}`")));
        }

        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            image: params.image,
            available: params.available,
            category: params.category,
            options: params.options,
        })
    }

    async fn on_update(&mut self, patch: MenuItemPatch, _ctx: &()) -> Result<bool, MenuError> {
        let flipped = self.available != patch.available;
        self.available = patch.available;
        Ok(flipped)
    }
}

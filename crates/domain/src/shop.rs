use crate::shared::entity::{Entity, ID};

/// A seller's storefront. Owned by exactly one seller `Account` and looked
/// up by owner, never embedded in the account record.
#[derive(Debug, Clone)]
pub struct Shop {
    pub id: ID,
    pub account_id: ID,
    pub name: String,
}

impl Shop {
    pub fn new(account_id: ID, name: String) -> Self {
        Self {
            id: Default::default(),
            account_id,
            name,
        }
    }
}

impl Entity for Shop {
    fn id(&self) -> &ID {
        &self.id
    }
}

use serde::Serialize;

use crate::catalog::{EnrichedProduct, UserId};

/// The interactive filter state. `selected_user` of `None` means all users.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    #[serde(rename = "selectedUser")]
    pub selected_user: Option<UserId>,
    #[serde(rename = "filterText")]
    pub filter_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `None` selects all users.
    SelectUser(Option<UserId>),
    SetFilterText(String),
    ClearFilterText,
    ResetAll,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.selected_user.is_none() && self.filter_text.is_empty()
    }

    pub fn matches(&self, product: &EnrichedProduct) -> bool {
        owner_matches(self.selected_user, product) && name_matches(&self.filter_text, product)
    }

    /// Lazily yields the products passing the current filters, in order.
    pub fn visible<'a>(
        &'a self,
        products: &'a [EnrichedProduct],
    ) -> impl Iterator<Item = &'a EnrichedProduct> + 'a {
        products.iter().filter(move |p| self.matches(p))
    }
}

pub fn reduce(state: FilterState, action: Action) -> FilterState {
    match action {
        Action::SelectUser(selected_user) => FilterState {
            selected_user,
            ..state
        },
        Action::SetFilterText(filter_text) => FilterState {
            filter_text,
            ..state
        },
        Action::ClearFilterText => FilterState {
            filter_text: String::new(),
            ..state
        },
        Action::ResetAll => FilterState::default(),
    }
}

fn owner_matches(selected_user: Option<UserId>, product: &EnrichedProduct) -> bool {
    selected_user.map_or(true, |id| product.user.id == id)
}

fn name_matches(filter_text: &str, product: &EnrichedProduct) -> bool {
    filter_text.is_empty()
        || product
            .name
            .to_lowercase()
            .contains(&filter_text.to_lowercase())
}

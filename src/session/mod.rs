pub mod command;

use thiserror::Error;

use crate::catalog::{find_user, Catalog, CatalogError, DataSource, EnrichedProduct, User};
use crate::filter::{self, Action, FilterState};
use crate::view::{self, Page, ViewFormat};

pub use command::{Command, CommandError, UserSelector};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("unknown user: {selector}")]
    UnknownUser { selector: String },

    #[error("failed to render view: {0}")]
    Render(#[from] serde_json::Error),
}

/// A viewing session: the joined catalog, computed once, plus the filter
/// state mutated by actions.
#[derive(Clone, Debug)]
pub struct Session {
    catalog: Catalog,
    products: Vec<EnrichedProduct>,
    state: FilterState,
}

impl Session {
    pub fn new(catalog: Catalog) -> Result<Self, SessionError> {
        let products = catalog.enrich()?;
        tracing::info!(
            users = catalog.users.len(),
            categories = catalog.categories.len(),
            products = products.len(),
            "catalog ready"
        );
        Ok(Self {
            catalog,
            products,
            state: FilterState::new(),
        })
    }

    pub fn load(source: &DataSource) -> Result<Self, SessionError> {
        Self::new(Catalog::load(source)?)
    }

    pub fn products(&self) -> &[EnrichedProduct] {
        &self.products
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &FilterState {
        tracing::debug!(?action, "dispatch");
        let current = std::mem::take(&mut self.state);
        self.state = filter::reduce(current, action);
        &self.state
    }

    /// Resolves a selector against the known users. `All` maps to `None`.
    pub fn resolve_user(&self, selector: &UserSelector) -> Result<Option<&User>, SessionError> {
        let found = match selector {
            UserSelector::All => return Ok(None),
            UserSelector::Id(id) => find_user(&self.catalog.users, *id),
            UserSelector::Name(name) => {
                let wanted = name.to_lowercase();
                self.catalog
                    .users
                    .iter()
                    .find(|u| u.name.to_lowercase() == wanted)
            }
        };
        found.map(Some).ok_or_else(|| SessionError::UnknownUser {
            selector: selector.to_string(),
        })
    }

    pub fn select_user(&mut self, selector: &UserSelector) -> Result<&FilterState, SessionError> {
        let id = self.resolve_user(selector)?.map(|u| u.id);
        Ok(self.dispatch(Action::SelectUser(id)))
    }

    pub fn visible(&self) -> impl Iterator<Item = &EnrichedProduct> + '_ {
        self.state.visible(&self.products)
    }

    pub fn page(&self) -> Page<'_> {
        Page::build(
            &self.catalog.users,
            &self.catalog.categories,
            &self.products,
            &self.state,
        )
    }

    pub fn render(&self, format: ViewFormat, color: bool) -> Result<Vec<u8>, SessionError> {
        Ok(view::render(&self.page(), format, color)?)
    }
}

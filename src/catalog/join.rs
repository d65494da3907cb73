use serde::Serialize;

use super::{Category, CatalogError, CategoryId, Product, ProductId, User, UserId};

/// A product together with its resolved category and the user owning that
/// category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    pub category: Category,
    pub user: User,
}

/// First category with the given id.
pub fn find_category(categories: &[Category], id: CategoryId) -> Option<&Category> {
    categories.iter().find(|c| c.id == id)
}

/// First user with the given id.
pub fn find_user(users: &[User], id: UserId) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

/// Resolves every product's category and owner, keeping product order.
///
/// Fails on the first dangling reference.
pub fn join(
    users: &[User],
    categories: &[Category],
    products: &[Product],
) -> Result<Vec<EnrichedProduct>, CatalogError> {
    let enriched = products
        .iter()
        .map(|product| {
            let category = find_category(categories, product.category_id).ok_or(
                CatalogError::MissingCategory {
                    product_id: product.id,
                    category_id: product.category_id,
                },
            )?;
            let user =
                find_user(users, category.owner_id).ok_or(CatalogError::MissingOwner {
                    category_id: category.id,
                    owner_id: category.owner_id,
                })?;
            Ok(EnrichedProduct {
                id: product.id,
                name: product.name.clone(),
                category_id: product.category_id,
                category: category.clone(),
                user: user.clone(),
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;
    tracing::debug!(products = enriched.len(), "joined catalog");
    Ok(enriched)
}

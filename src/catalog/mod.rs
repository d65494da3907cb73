pub mod join;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use join::{find_category, find_user, join, EnrichedProduct};

pub type UserId = u32;
pub type CategoryId = u32;
pub type ProductId = u32;

const BUILTIN_USERS: &str = include_str!("../../data/users.json");
const BUILTIN_CATEGORIES: &str = include_str!("../../data/categories.json");
const BUILTIN_PRODUCTS: &str = include_str!("../../data/products.json");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub sex: Sex,
}

/// Only `m` is distinguished when rendering; every other value takes the
/// alternate styling, so unknown values are kept instead of rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Other(String),
}

impl Sex {
    pub fn is_male(&self) -> bool {
        matches!(self, Sex::Male)
    }
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        match value.as_str() {
            "m" => Sex::Male,
            "f" => Sex::Female,
            _ => Sex::Other(value),
        }
    }
}

impl From<Sex> for String {
    fn from(value: Sex) -> Self {
        match value {
            Sex::Male => "m".to_string(),
            Sex::Female => "f".to_string(),
            Sex::Other(other) => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub icon: String,
    #[serde(rename = "ownerId", alias = "owner_id")]
    pub owner_id: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "categoryId", alias = "category_id")]
    pub category_id: CategoryId,
}

#[derive(Clone, Debug)]
pub enum DataSource {
    Builtin,
    Files {
        users: PathBuf,
        categories: PathBuf,
        products: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {product_id} references missing category {category_id}")]
    MissingCategory {
        product_id: ProductId,
        category_id: CategoryId,
    },

    #[error("category {category_id} references missing owner {owner_id}")]
    MissingOwner {
        category_id: CategoryId,
        owner_id: UserId,
    },

    #[error("failed to read {kind} data: {path}: {source}")]
    FileRead {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} data: {path}: {source}")]
    Json {
        kind: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {kind} data: {path}: {source}")]
    Yaml {
        kind: &'static str,
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported {kind} data file (expected .json, .yml or .yaml): {path}")]
    UnsupportedFormat { kind: &'static str, path: String },
}

/// The three raw datasets, in the order they were supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(users: Vec<User>, categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            users,
            categories,
            products,
        }
    }

    pub fn load(source: &DataSource) -> Result<Self, CatalogError> {
        match source {
            DataSource::Builtin => Self::builtin(),
            DataSource::Files {
                users,
                categories,
                products,
            } => Self::from_files(users, categories, products),
        }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self {
            users: parse_builtin("users", BUILTIN_USERS)?,
            categories: parse_builtin("categories", BUILTIN_CATEGORIES)?,
            products: parse_builtin("products", BUILTIN_PRODUCTS)?,
        })
    }

    pub fn from_files(
        users: &Path,
        categories: &Path,
        products: &Path,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            users: read_records("users", users)?,
            categories: read_records("categories", categories)?,
            products: read_records("products", products)?,
        })
    }

    pub fn enrich(&self) -> Result<Vec<EnrichedProduct>, CatalogError> {
        join(&self.users, &self.categories, &self.products)
    }
}

fn parse_builtin<T: DeserializeOwned>(
    kind: &'static str,
    raw: &str,
) -> Result<Vec<T>, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Json {
        kind,
        path: "<builtin>".to_string(),
        source,
    })
}

enum DataFormat {
    Json,
    Yaml,
}

fn data_format(path: &Path) -> Option<DataFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "json" => Some(DataFormat::Json),
        "yml" | "yaml" => Some(DataFormat::Yaml),
        _ => None,
    }
}

fn read_records<T: DeserializeOwned>(
    kind: &'static str,
    path: &Path,
) -> Result<Vec<T>, CatalogError> {
    let shown = path.display().to_string();
    let format = data_format(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        kind,
        path: shown.clone(),
    })?;
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::FileRead {
        kind,
        path: shown.clone(),
        source,
    })?;
    let records = match format {
        DataFormat::Json => serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
            kind,
            path: shown.clone(),
            source,
        })?,
        DataFormat::Yaml => {
            serde_yaml::from_str(&contents).map_err(|source| CatalogError::Yaml {
                kind,
                path: shown.clone(),
                source,
            })?
        }
    };
    tracing::debug!(kind, path = %shown, "loaded data file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn builtin_dataset_parses_and_joins() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.users.is_empty());
        assert!(!catalog.categories.is_empty());
        let enriched = catalog.enrich().unwrap();
        assert_eq!(enriched.len(), catalog.products.len());
    }

    #[test]
    fn sex_keeps_unknown_values() {
        let user: User = serde_json::from_str(r#"{"id":7,"name":"Kim","sex":"x"}"#).unwrap();
        assert_eq!(user.sex, Sex::Other("x".to_string()));
        assert!(!user.sex.is_male());
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["sex"], "x");
    }

    #[test]
    fn category_accepts_snake_case_alias() {
        let category: Category =
            serde_json::from_str(r#"{"id":1,"title":"T","icon":"i","owner_id":3}"#).unwrap();
        assert_eq!(category.owner_id, 3);
    }

    #[test]
    fn loads_mixed_json_and_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_file(&dir, "users.yml", "- id: 1\n  name: Max\n  sex: m\n");
        let categories = write_file(
            &dir,
            "categories.json",
            r#"[{"id":10,"title":"Fruits","icon":"🍎","ownerId":1}]"#,
        );
        let products = write_file(
            &dir,
            "products.yaml",
            "- id: 100\n  name: Apple\n  categoryId: 10\n",
        );

        let catalog = Catalog::load(&DataSource::Files {
            users,
            categories,
            products,
        })
        .unwrap();
        assert_eq!(catalog.users[0].name, "Max");
        assert_eq!(catalog.categories[0].owner_id, 1);
        assert_eq!(catalog.products[0].category_id, 10);
    }

    #[test]
    fn loading_emits_debug_event() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_file(&dir, "users.json", r#"[{"id":1,"name":"Max","sex":"m"}]"#);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let loaded: Vec<User> = tracing::subscriber::with_default(subscriber, || {
            read_records("users", &users).unwrap()
        });
        assert_eq!(loaded[0].name, "Max");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_file(&dir, "users.csv", "id,name\n");
        let err = Catalog::from_files(&users, &users, &users).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnsupportedFormat { kind: "users", .. }
        ));
    }

    #[test]
    fn missing_file_reports_kind_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = Catalog::from_files(&missing, &missing, &missing).unwrap_err();
        assert!(matches!(err, CatalogError::FileRead { kind: "users", .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_file(&dir, "users.json", "[{\"id\": }]");
        let err = Catalog::from_files(&users, &users, &users).unwrap_err();
        assert!(matches!(err, CatalogError::Json { kind: "users", .. }));
    }
}

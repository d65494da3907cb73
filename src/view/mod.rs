pub mod page;

use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;

use crate::catalog::{Category, EnrichedProduct, ProductId, User};
use crate::filter::FilterState;

pub const NO_MATCHING_MESSAGE: &str = "No products matching selected criteria";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewFormat {
    Text,
    Json,
    Html,
}

impl ViewFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<ViewFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(ViewFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(ViewFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(ViewFormat::Text);
    }
    None
}

/// How a user's name is emphasised: `m` gets the link style, anything else
/// the danger style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStyle {
    Link,
    Danger,
}

impl UserStyle {
    pub fn for_user(user: &User) -> Self {
        if user.sex.is_male() {
            Self::Link
        } else {
            Self::Danger
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Link => "has-text-link",
            Self::Danger => "has-text-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub user: String,
    #[serde(rename = "userStyle")]
    pub user_style: UserStyle,
}

impl ProductRow {
    pub fn from_product(product: &EnrichedProduct) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: format!("{} - {}", product.category.icon, product.category.title),
            user: product.user.name.clone(),
            user_style: UserStyle::for_user(&product.user),
        }
    }
}

/// Everything a renderer needs for one frame: the controls' data, the
/// current state and the rows passing the filters.
#[derive(Clone, Debug)]
pub struct Page<'a> {
    pub users: &'a [User],
    pub categories: &'a [Category],
    pub state: &'a FilterState,
    pub rows: Vec<ProductRow>,
}

impl<'a> Page<'a> {
    pub fn build(
        users: &'a [User],
        categories: &'a [Category],
        products: &[EnrichedProduct],
        state: &'a FilterState,
    ) -> Self {
        let rows = state
            .visible(products)
            .map(ProductRow::from_product)
            .collect();
        Self {
            users,
            categories,
            state,
            rows,
        }
    }

    /// Shown whenever no filter is active, not when the result is empty.
    pub fn shows_no_matching_message(&self) -> bool {
        self.state.is_unfiltered()
    }
}

pub fn render(
    page: &Page<'_>,
    format: ViewFormat,
    color: bool,
) -> Result<Vec<u8>, serde_json::Error> {
    match format {
        ViewFormat::Text => Ok(render_text(page, color).into_bytes()),
        ViewFormat::Json => render_json(page),
        ViewFormat::Html => Ok(page::render_html(page)),
    }
}

pub fn render_text(page: &Page<'_>, color: bool) -> String {
    let mut out = String::new();

    let all_active = page.state.selected_user.is_none();
    let tabs = std::iter::once(tab("All", all_active, color))
        .chain(page.users.iter().map(|u| {
            tab(&u.name, page.state.selected_user == Some(u.id), color)
        }))
        .join("  ");
    out.push_str(&format!(":: {:<10}: {}\n", "Users", tabs));

    let search = if page.state.filter_text.is_empty() {
        "\"\"".to_string()
    } else {
        format!("\"{}\" (clear)", page.state.filter_text)
    };
    out.push_str(&format!(":: {:<10}: {}\n", "Search", search));

    let categories = std::iter::once("All".to_string())
        .chain(page.categories.iter().map(|c| c.title.clone()))
        .join("  ");
    out.push_str(&format!(":: {:<10}: {}\n", "Categories", categories));
    out.push('\n');

    if page.shows_no_matching_message() {
        out.push_str(NO_MATCHING_MESSAGE);
        out.push_str("\n\n");
    }

    let headers = ["ID", "Product", "Category", "User"];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in page.rows.iter() {
        let cells = [row.id.to_string(), row.name.clone(), row.category.clone()];
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .join("  ");
    if color {
        out.push_str(&header_line.trim_end().bold().to_string());
    } else {
        out.push_str(header_line.trim_end());
    }
    out.push('\n');

    for row in page.rows.iter() {
        let id = pad(&row.id.to_string(), widths[0]);
        let name = pad(&row.name, widths[1]);
        let category = pad(&row.category, widths[2]);
        let (id, user) = if color {
            let user = match row.user_style {
                UserStyle::Link => row.user.blue().to_string(),
                UserStyle::Danger => row.user.red().to_string(),
            };
            (id.bold().to_string(), user)
        } else {
            (id, row.user.clone())
        };
        out.push_str(&[id, name, category, user].iter().join("  "));
        out.push('\n');
    }

    out
}

pub fn render_json(page: &Page<'_>) -> Result<Vec<u8>, serde_json::Error> {
    #[derive(Serialize)]
    struct JsonView<'p> {
        state: &'p FilterState,
        products: &'p [ProductRow],
        #[serde(rename = "noMatchingMessage")]
        no_matching_message: bool,
    }

    let view = JsonView {
        state: page.state,
        products: &page.rows,
        no_matching_message: page.shows_no_matching_message(),
    };
    let mut out = serde_json::to_vec_pretty(&view)?;
    out.push(b'\n');
    Ok(out)
}

fn tab(label: &str, active: bool, color: bool) -> String {
    match (active, color) {
        (true, true) => format!("[{}]", label).bold().to_string(),
        (true, false) => format!("[{}]", label),
        (false, _) => label.to_string(),
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut out = value.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

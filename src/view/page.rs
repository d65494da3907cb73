use super::{Page, NO_MATCHING_MESSAGE};

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn active_class(active: bool) -> &'static str {
    if active {
        " class=\"is-active\""
    } else {
        ""
    }
}

fn render_user_tabs(page: &Page<'_>, out: &mut String) {
    out.push_str("            <p class=\"panel-tabs has-text-weight-bold\">\n");
    out.push_str(&format!(
        "              <a data-cy=\"FilterAllUsers\" href=\"#/\"{}>All</a>\n",
        active_class(page.state.selected_user.is_none())
    ));
    for user in page.users.iter() {
        out.push_str(&format!(
            "              <a data-cy=\"FilterUser\" data-user-id=\"{}\" href=\"#/\"{}>{}</a>\n",
            user.id,
            active_class(page.state.selected_user == Some(user.id)),
            escape_html(&user.name)
        ));
    }
    out.push_str("            </p>\n");
}

fn render_search(page: &Page<'_>, out: &mut String) {
    out.push_str("            <div class=\"panel-block\">\n");
    out.push_str("              <p class=\"control has-icons-left has-icons-right is-expanded\">\n");
    out.push_str(&format!(
        "                <input data-cy=\"SearchField\" type=\"text\" class=\"input\" placeholder=\"Search\" value=\"{}\"/>\n",
        escape_html(&page.state.filter_text)
    ));
    out.push_str("                <span class=\"icon is-left\"><i class=\"fas fa-search\" aria-hidden=\"true\"></i></span>\n");
    if !page.state.filter_text.is_empty() {
        out.push_str("                <span class=\"icon is-right\"><button data-cy=\"ClearButton\" type=\"button\" class=\"delete\"></button></span>\n");
    }
    out.push_str("              </p>\n");
    out.push_str("            </div>\n");
}

// Category links carry no state; they are never marked active.
fn render_categories(page: &Page<'_>, out: &mut String) {
    out.push_str("            <div class=\"panel-block is-flex-wrap-wrap\">\n");
    out.push_str("              <a href=\"#/\" data-cy=\"AllCategories\" class=\"button is-success mr-6 is-outlined\">All</a>\n");
    for category in page.categories.iter() {
        out.push_str(&format!(
            "              <a data-cy=\"Category\" class=\"button mr-2 my-1\" href=\"#/\">{}</a>\n",
            escape_html(&category.title)
        ));
    }
    out.push_str("            </div>\n");
}

fn render_table(page: &Page<'_>, out: &mut String) {
    out.push_str("          <table data-cy=\"ProductTable\" class=\"table is-striped is-narrow is-fullwidth\">\n");
    out.push_str("            <thead>\n              <tr>\n");
    for (label, icon) in [
        ("ID", "fa-sort"),
        ("Product", "fa-sort-down"),
        ("Category", "fa-sort-up"),
        ("User", "fa-sort"),
    ] {
        out.push_str(&format!(
            "                <th><span class=\"is-flex is-flex-wrap-nowrap\">{label}<a href=\"#/\"><span class=\"icon\"><i data-cy=\"SortIcon\" class=\"fas {icon}\"></i></span></a></span></th>\n"
        ));
    }
    out.push_str("              </tr>\n            </thead>\n");
    out.push_str("            <tbody>\n");
    for row in page.rows.iter() {
        out.push_str("              <tr data-cy=\"Product\">\n");
        out.push_str(&format!(
            "                <td class=\"has-text-weight-bold\" data-cy=\"ProductId\">{}</td>\n",
            row.id
        ));
        out.push_str(&format!(
            "                <td data-cy=\"ProductName\">{}</td>\n",
            escape_html(&row.name)
        ));
        out.push_str(&format!(
            "                <td data-cy=\"ProductCategory\">{}</td>\n",
            escape_html(&row.category)
        ));
        out.push_str(&format!(
            "                <td data-cy=\"ProductUser\" class=\"{}\">{}</td>\n",
            row.user_style.class(),
            escape_html(&row.user)
        ));
        out.push_str("              </tr>\n");
    }
    out.push_str("            </tbody>\n");
    out.push_str("          </table>\n");
}

pub fn render_html(page: &Page<'_>) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Product Categories</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css"/>
  <link rel="stylesheet" href="https://use.fontawesome.com/releases/v5.15.4/css/all.css"/>
</head>
<body>
  <div class="section">
    <div class="container">
      <h1 class="title">Product Categories</h1>
      <div class="block">
        <nav class="panel">
          <p class="panel-heading">Filters</p>
"#,
    );
    render_user_tabs(page, &mut out);
    render_search(page, &mut out);
    render_categories(page, &mut out);
    out.push_str("            <div class=\"panel-block\">\n");
    out.push_str("              <a data-cy=\"ResetAllButton\" href=\"#/\" class=\"button is-link is-outlined is-fullwidth\">Reset all filters</a>\n");
    out.push_str("            </div>\n");
    out.push_str("        </nav>\n      </div>\n");
    out.push_str("      <div class=\"box table-container\">\n");
    if page.shows_no_matching_message() {
        out.push_str(&format!(
            "        <p data-cy=\"NoMatchingMessage\">{}</p>\n",
            NO_MATCHING_MESSAGE
        ));
    }
    render_table(page, &mut out);
    out.push_str("      </div>\n    </div>\n  </div>\n</body>\n</html>\n");
    out.into_bytes()
}

use std::io::Cursor;

use crate::app::run_session;
use crate::catalog::{Catalog, Category, DataSource, Product, Sex, User};
use crate::filter::{reduce, Action, FilterState};
use crate::session::Session;
use crate::view::{ViewFormat, NO_MATCHING_MESSAGE};

fn fruit_catalog() -> Catalog {
    Catalog::new(
        vec![User {
            id: 1,
            name: "Max".to_string(),
            sex: Sex::Male,
        }],
        vec![Category {
            id: 10,
            title: "Fruits".to_string(),
            icon: "🍎".to_string(),
            owner_id: 1,
        }],
        vec![Product {
            id: 100,
            name: "Apple".to_string(),
            category_id: 10,
        }],
    )
}

fn drive(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    run_session(session, Cursor::new(script), &mut out, ViewFormat::Text, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn single_product_catalog_filters_by_name() {
    let mut session = Session::new(fruit_catalog()).unwrap();
    session.dispatch(Action::SetFilterText("app".to_string()));
    let visible: Vec<_> = session.visible().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 100);
    assert_eq!(visible[0].name, "Apple");
    assert_eq!(visible[0].category.title, "Fruits");
    assert_eq!(visible[0].category.icon, "🍎");
    assert_eq!(visible[0].user.name, "Max");

    session.dispatch(Action::SetFilterText("xyz".to_string()));
    assert_eq!(session.visible().count(), 0);
}

#[test]
fn every_enriched_product_resolves_its_keys() {
    let catalog = Catalog::builtin().unwrap();
    let products = catalog.enrich().unwrap();
    for (enriched, raw) in products.iter().zip(catalog.products.iter()) {
        assert_eq!(enriched.id, raw.id);
        assert_eq!(enriched.category.id, raw.category_id);
        assert_eq!(enriched.user.id, enriched.category.owner_id);
    }
}

#[test]
fn reset_from_any_state_shows_everything() {
    let session = Session::load(&DataSource::Builtin).unwrap();
    let total = session.products().len();
    let states = [
        FilterState::new(),
        FilterState {
            selected_user: Some(4),
            filter_text: String::new(),
        },
        FilterState {
            selected_user: Some(2),
            filter_text: "nothing here".to_string(),
        },
    ];
    for state in states {
        let reset = reduce(state, Action::ResetAll);
        assert_eq!(reset, FilterState::new());
        assert_eq!(reset.visible(session.products()).count(), total);
    }
}

#[test]
fn user_without_categories_sees_empty_table() {
    let mut session = Session::load(&DataSource::Builtin).unwrap();
    let out = drive(&mut session, "user John\n");
    assert_eq!(session.state().selected_user, Some(4));
    assert_eq!(session.visible().count(), 0);
    // The message tracks "no filters active", not "no rows".
    assert_eq!(out.matches(NO_MATCHING_MESSAGE).count(), 1);
}

#[test]
fn interactive_script_renders_after_each_change() {
    let mut session = Session::load(&DataSource::Builtin).unwrap();
    let out = drive(
        &mut session,
        "user Anna\nsearch SAU\n\nshow\nclear\nreset\nquit\nsearch ignored\n",
    );
    assert_eq!(out.matches(":: Users").count(), 6);
    assert!(out.contains("All  Roma  [Anna]"));
    assert!(out.contains("\"SAU\" (clear)"));
    assert_eq!(session.state(), &FilterState::new());
}

#[test]
fn interactive_errors_do_not_change_state() {
    let mut session = Session::load(&DataSource::Builtin).unwrap();
    let out = drive(&mut session, "search milk\nuser Zed\nsort name\n");
    assert!(out.contains("[ERR] unknown user: Zed"));
    assert!(out.contains("[ERR] unknown command: sort"));
    assert_eq!(session.state().filter_text, "milk");
    assert_eq!(session.state().selected_user, None);
    assert_eq!(out.matches(":: Users").count(), 2);
}

#[test]
fn help_lists_commands_without_rendering() {
    let mut session = Session::load(&DataSource::Builtin).unwrap();
    let out = drive(&mut session, "help\n");
    assert!(out.contains("user <id|name|all>"));
    assert_eq!(out.matches(":: Users").count(), 1);
}

#[test]
fn loads_catalog_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let users = dir.path().join("users.json");
    let categories = dir.path().join("categories.yml");
    let products = dir.path().join("products.json");
    std::fs::write(&users, r#"[{"id":1,"name":"Max","sex":"m"}]"#).unwrap();
    std::fs::write(
        &categories,
        "- id: 10\n  title: Fruits\n  icon: \"🍎\"\n  ownerId: 2\n",
    )
    .unwrap();
    std::fs::write(&products, r#"[{"id":100,"name":"Apple","categoryId":10}]"#).unwrap();

    let err = Session::load(&DataSource::Files {
        users,
        categories,
        products,
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "category 10 references missing owner 2");
}

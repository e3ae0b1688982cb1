mod common;

use common::book;
use filtercrate::{
    FieldType, Filter, FilterParams, Filterable, FilterValue, QueryPlan, QueryTarget,
    exists_resolver,
};
use sea_orm::sea_query::{Alias, Expr, Order};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait};

async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    let statements = [
        "CREATE TABLE authors (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        "CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT NOT NULL, genre TEXT NOT NULL, \
         in_stock INTEGER NOT NULL, price REAL NOT NULL, author_id INTEGER NOT NULL)",
        "INSERT INTO authors (id, name) VALUES \
         (1, 'J. R. R. Tolkien'), \
         (2, 'Ursula K. Le Guin')",
        "INSERT INTO books (id, title, genre, in_stock, price, author_id) VALUES \
         (1, 'The Hobbit', 'fantasy', 1, 10.0, 1), \
         (2, 'A Wizard of Earthsea', 'fantasy', 0, 12.5, 2), \
         (3, 'The Dispossessed', 'scifi', 1, 9.0, 2)",
    ];
    for statement in statements {
        db.execute_unprepared(statement).await.expect("setup statement failed");
    }
    db
}

fn book_filter() -> Filter {
    Filter::builder()
        .filterable(
            "genre",
            FieldType::String,
            |query: &mut dyn QueryTarget, value: FilterValue| {
                query.and_where(Expr::col(Alias::new("genre")).eq(value));
            },
        )
        .filterable(
            "in_stock",
            FieldType::Boolean,
            |query: &mut dyn QueryTarget, value: FilterValue| {
                query.and_where(Expr::col(Alias::new("in_stock")).eq(value));
            },
        )
        .filterable(
            "price_max",
            FieldType::Double,
            |query: &mut dyn QueryTarget, value: FilterValue| {
                query.and_where(Expr::col(Alias::new("price")).lte(value));
            },
        )
        .searchable("title")
        .searchable("author.name")
        .orderable("title")
        .orderable("price")
        .default_order("id", Order::Asc)
        .build()
}

fn plan() -> QueryPlan {
    QueryPlan::new().with_relation("author", exists_resolver("authors", "id", "books", "author_id"))
}

fn request(pairs: &[(&str, &str)]) -> FilterParams {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

async fn titles(db: &DatabaseConnection, params: &FilterParams) -> Vec<String> {
    book::Entity::find()
        .apply_filter(&book_filter(), params, plan())
        .all(db)
        .await
        .expect("query failed")
        .into_iter()
        .map(|model| model.title)
        .collect()
}

#[tokio::test]
async fn fixture_rows_are_in_place() {
    let db = setup_db().await;
    let authors = common::author::Entity::find()
        .all(&db)
        .await
        .expect("query failed");
    assert_eq!(authors.len(), 2);
    let books = book::Entity::find().all(&db).await.expect("query failed");
    assert_eq!(books.len(), 3);
}

#[tokio::test]
async fn equality_filter_with_default_order() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("genre", "fantasy")])).await;
    assert_eq!(found, vec!["The Hobbit", "A Wizard of Earthsea"]);
}

#[tokio::test]
async fn boolean_filter_coerces_truthy_and_falsy_values() {
    let db = setup_db().await;
    let in_stock = titles(&db, &request(&[("in_stock", "YES")])).await;
    assert_eq!(in_stock, vec!["The Hobbit", "The Dispossessed"]);

    let out_of_stock = titles(&db, &request(&[("in_stock", "0")])).await;
    assert_eq!(out_of_stock, vec!["A Wizard of Earthsea"]);
}

#[tokio::test]
async fn numeric_filter_uses_weak_coercion() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("price_max", "10")])).await;
    assert_eq!(found, vec!["The Hobbit", "The Dispossessed"]);
}

#[tokio::test]
async fn search_reaches_through_the_author_relation() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("search", "tolkien")])).await;
    assert_eq!(found, vec!["The Hobbit"]);
}

#[tokio::test]
async fn search_matches_direct_fields_too() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("search", "earthsea")])).await;
    assert_eq!(found, vec!["A Wizard of Earthsea"]);
}

#[tokio::test]
async fn search_combines_with_filters_via_and() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("genre", "fantasy"), ("search", "guin")])).await;
    assert_eq!(found, vec!["A Wizard of Earthsea"]);
}

#[tokio::test]
async fn request_driven_ordering_wins_over_defaults() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("orderBy", "price:desc")])).await;
    assert_eq!(
        found,
        vec!["A Wizard of Earthsea", "The Hobbit", "The Dispossessed"]
    );
}

#[tokio::test]
async fn unknown_parameters_do_not_constrain_the_query() {
    let db = setup_db().await;
    let found = titles(&db, &request(&[("publisher", "acme")])).await;
    assert_eq!(found.len(), 3);
}

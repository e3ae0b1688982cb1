//! # filtercrate
//!
//! Declarative request-to-query filtering for Axum and Sea-ORM. Declare once
//! which request parameters an endpoint accepts, how each one is typed, and
//! which fields participate in free-text search and ordering; the engine
//! turns any incoming parameter bag into query predicates, ignoring
//! everything outside the declaration.
//!
//! ```rust,ignore
//! use filtercrate::{FieldType, Filter, Filterable, FilterParams, FilterValue,
//!     QueryPlan, QueryTarget, exists_resolver};
//! use sea_orm::EntityTrait;
//! use sea_orm::sea_query::{Alias, Expr, Order};
//!
//! let filter = Filter::builder()
//!     .filterable("genre", FieldType::String, |query: &mut dyn QueryTarget, value: FilterValue| {
//!         query.and_where(Expr::col(Alias::new("genre")).eq(value));
//!     })
//!     .searchable("title")
//!     .searchable("author.name")
//!     .orderable("title")
//!     .default_order("id", Order::Asc)
//!     .build();
//!
//! async fn list(params: FilterParams) { // axum extractor
//!     let plan = QueryPlan::new()
//!         .with_relation("author", exists_resolver("authors", "id", "books", "author_id"));
//!     let _query = book::Entity::find().apply_filter(&filter, &params, plan);
//! }
//! ```
//!
//! New filter definitions can be scaffolded with the bundled binary:
//! `make-filter blog::PostFilter`.

pub mod filtering;
pub mod params;
pub mod scaffold;
pub mod target;
pub mod traits;

pub use filtering::coerce::{FieldType, FilterValue};
pub use filtering::engine::{Filter, FilterBuilder};
pub use filtering::sort::{OrderTarget, Orderable, resolve_order};
pub use params::{FilterParams, ParameterSource};
pub use scaffold::ScaffoldError;
pub use target::{QueryPlan, QueryTarget, RelationResolver, exists_resolver};
pub use traits::Filterable;

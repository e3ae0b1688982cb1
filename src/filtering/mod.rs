//! # Filtering & Search
//!
//! Turns a bag of request parameters into query predicates without
//! per-endpoint conditional logic. A [`Filter`](engine::Filter) declares which
//! parameters are accepted and how each one constrains the query; everything
//! outside the declaration is ignored.
//!
//! ## Key pieces
//!
//! - **Whitelist + coercion**: each accepted parameter carries one of five
//!   scalar kinds ([`FieldType`](coerce::FieldType)) and a handler closure
//!   that receives the coerced value.
//! - **Free-text search**: one OR-group spanning the declared searchable
//!   fields, including fields reached through relations (`author.name`).
//! - **Ordering**: a `field:direction` comma grammar resolved against the
//!   declared sortable keys, falling back to a static default order.
//!
//! ## Example
//!
//! ```rust,ignore
//! use filtercrate::{FieldType, Filter, FilterValue, QueryTarget};
//! use sea_orm::sea_query::{Alias, Expr, Order};
//!
//! let filter = Filter::builder()
//!     .filterable("genre", FieldType::String, |query: &mut dyn QueryTarget, value: FilterValue| {
//!         query.and_where(Expr::col(Alias::new("genre")).eq(value));
//!     })
//!     .filterable("in_stock", FieldType::Boolean, |query: &mut dyn QueryTarget, value: FilterValue| {
//!         query.and_where(Expr::col(Alias::new("in_stock")).eq(value));
//!     })
//!     .searchable("title")
//!     .searchable("author.name")
//!     .orderable("title")
//!     .orderable_as("price", "price_cents")
//!     .default_order("id", Order::Asc)
//!     .build();
//!
//! // GET /books?genre=fantasy&search=tolkien&orderBy=price:desc,title
//! ```

pub mod coerce;
pub mod engine;
pub mod sort;

pub use coerce::{FieldType, FilterValue};
pub use engine::{Filter, FilterBuilder};
pub use sort::{Orderable, OrderTarget, resolve_order};

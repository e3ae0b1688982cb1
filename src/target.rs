//! Query targets.
//!
//! [`QueryTarget`] is the capability interface the engine mutates; any
//! predicate builder offering these four operations can be filtered.
//! [`QueryPlan`] is the provided implementation: it accumulates an AND-root
//! condition plus an ordered list of ORDER BY keys, and carries the
//! per-relation resolvers used by search paths that traverse a relation.

use std::collections::HashMap;

use sea_orm::sea_query::{
    Alias, ConditionalStatement, Expr, Order, OrderedStatement, Query, SimpleExpr,
};
use sea_orm::{Condition, EntityTrait, QueryTrait, Select};

/// Mutable predicate-builder capability consumed by the engine.
pub trait QueryTarget {
    /// AND a single predicate onto the query.
    fn and_where(&mut self, predicate: SimpleExpr);

    /// AND a pre-built condition tree onto the query. The engine uses this
    /// for the search OR-group, so the group combines with other predicates
    /// via AND while its entries stay OR'd together.
    fn and_condition(&mut self, condition: Condition);

    /// Produce a predicate asserting a related record exists through
    /// `relation` with `column LIKE pattern`. `None` means the relation
    /// cannot be resolved and the entry is left out of the search group.
    fn relation_like(&mut self, relation: &str, column: &str, pattern: &str)
    -> Option<SimpleExpr>;

    /// Append an ORDER BY key.
    fn order_by(&mut self, column: &str, direction: Order);
}

/// Builds the relation-exists predicate for one registered relation path.
pub type RelationResolver = Box<dyn Fn(&str, &str) -> SimpleExpr + Send + Sync>;

/// The default [`QueryTarget`]: collects predicates and ordering, then pushes
/// them onto a Sea-ORM select.
pub struct QueryPlan {
    condition: Condition,
    orders: Vec<(String, Order)>,
    resolvers: HashMap<String, RelationResolver>,
}

impl Default for QueryPlan {
    fn default() -> Self {
        Self {
            condition: Condition::all(),
            orders: Vec::new(),
            resolvers: HashMap::new(),
        }
    }
}

impl QueryPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for a relation path used by searchable fields.
    /// Paths with no registered resolver are skipped at search time.
    #[must_use]
    pub fn with_relation(mut self, path: impl Into<String>, resolver: RelationResolver) -> Self {
        self.resolvers.insert(path.into(), resolver);
        self
    }

    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    #[must_use]
    pub fn orders(&self) -> &[(String, Order)] {
        &self.orders
    }

    #[must_use]
    pub fn into_parts(self) -> (Condition, Vec<(String, Order)>) {
        (self.condition, self.orders)
    }

    /// Push the accumulated condition and ordering onto a select.
    pub fn apply_to<E: EntityTrait>(self, mut select: Select<E>) -> Select<E> {
        let query = QueryTrait::query(&mut select);
        query.cond_where(self.condition);
        for (column, direction) in self.orders {
            query.order_by(Alias::new(column), direction);
        }
        select
    }
}

impl QueryTarget for QueryPlan {
    fn and_where(&mut self, predicate: SimpleExpr) {
        let root = std::mem::replace(&mut self.condition, Condition::all());
        self.condition = root.add(predicate);
    }

    fn and_condition(&mut self, condition: Condition) {
        let root = std::mem::replace(&mut self.condition, Condition::all());
        self.condition = root.add(condition);
    }

    fn relation_like(
        &mut self,
        relation: &str,
        column: &str,
        pattern: &str,
    ) -> Option<SimpleExpr> {
        match self.resolvers.get(relation) {
            Some(resolver) => Some(resolver(column, pattern)),
            None => {
                tracing::debug!(relation, column, "no resolver registered, skipping search path");
                None
            }
        }
    }

    fn order_by(&mut self, column: &str, direction: Order) {
        self.orders.push((column.to_owned(), direction));
    }
}

/// Resolver for the common foreign-key case: the predicate renders as
/// `EXISTS (SELECT .. FROM <table> WHERE <table>.<key> = <owner>.<owner_key>
/// AND <table>.<column> LIKE <pattern>)`.
#[must_use]
pub fn exists_resolver(
    table: impl Into<String>,
    key: impl Into<String>,
    owner: impl Into<String>,
    owner_key: impl Into<String>,
) -> RelationResolver {
    let table = table.into();
    let key = key.into();
    let owner = owner.into();
    let owner_key = owner_key.into();
    Box::new(move |column, pattern| {
        let subquery = Query::select()
            .column((Alias::new(&table), Alias::new(&key)))
            .from(Alias::new(&table))
            .and_where(
                Expr::col((Alias::new(&table), Alias::new(&key)))
                    .equals((Alias::new(&owner), Alias::new(&owner_key))),
            )
            .and_where(Expr::col((Alias::new(&table), Alias::new(column))).like(pattern))
            .to_owned();
        Expr::exists(subquery)
    })
}

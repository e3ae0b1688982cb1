//! The filter-application engine.

use std::collections::HashMap;

use sea_orm::Condition;
use sea_orm::sea_query::{Alias, Expr, Order};

use crate::filtering::coerce::{FieldType, FilterValue, coerce};
use crate::filtering::sort::{OrderTarget, Orderable, resolve_order};
use crate::params::ParameterSource;
use crate::target::QueryTarget;

/// Handler invoked with the coerced value of a whitelisted parameter. The
/// handler decides what predicate(s) the value adds to the target.
pub type FilterHandler = Box<dyn Fn(&mut dyn QueryTarget, FilterValue) + Send + Sync>;

/// Handler invoked for a sort key that needs custom ORDER BY logic.
pub type OrderHandler = Box<dyn Fn(&mut dyn QueryTarget, Order) + Send + Sync>;

struct FilterField {
    name: String,
    kind: FieldType,
    handler: FilterHandler,
}

/// A declarative filter definition.
///
/// Built once with [`Filter::builder`], then applied to any number of
/// request/target pairs. Only parameters registered through
/// [`FilterBuilder::filterable`] are ever read from the request; everything
/// else in the parameter bag is ignored.
///
/// Search phrases are used verbatim in `LIKE '%phrase%'` patterns, so `%`
/// and `_` in a phrase act as wildcards. Known limitation of the search
/// grammar.
pub struct Filter {
    filterables: Vec<FilterField>,
    searchables: Vec<String>,
    orderables: Vec<Orderable>,
    order_handlers: HashMap<String, OrderHandler>,
    search_field: String,
    sort_field: String,
    default_order: Vec<(String, Order)>,
}

impl Filter {
    #[must_use]
    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    /// Apply the definition: whitelisted parameters first, then free-text
    /// search, then ordering. Later steps see predicates added by earlier
    /// ones; ordering always runs, falling back to the default order when
    /// the sort parameter is absent or yields nothing usable.
    pub fn apply(&self, params: &dyn ParameterSource, target: &mut dyn QueryTarget) {
        let names: Vec<&str> = self.filterables.iter().map(|field| field.name.as_str()).collect();
        for (name, raw) in params.get_multi(&names) {
            let Some(field) = self.filterables.iter().find(|field| field.name == name) else {
                continue;
            };
            let value = coerce(&raw, field.kind);
            tracing::debug!(filter = %name, ?value, "applying filter parameter");
            (field.handler)(target, value);
        }

        if params.filled(&self.search_field) {
            if let Some(phrase) = params.get(&self.search_field) {
                self.search(phrase, target);
            }
        }

        self.apply_ordering(params, target);
    }

    /// Add one OR-group covering every searchable field. Paths containing a
    /// `.` are split on the last separator into (relation path, property)
    /// and delegated to the target's relation capability.
    fn search(&self, phrase: &str, target: &mut dyn QueryTarget) {
        if self.searchables.is_empty() {
            return;
        }
        let pattern = format!("%{phrase}%");
        let mut group = Condition::any();
        for path in &self.searchables {
            match path.rsplit_once('.') {
                None => {
                    group = group.add(Expr::col(Alias::new(path.as_str())).like(pattern.as_str()));
                }
                Some((relation, property)) => {
                    if let Some(predicate) = target.relation_like(relation, property, &pattern) {
                        group = group.add(predicate);
                    }
                }
            }
        }
        target.and_condition(group);
    }

    fn apply_ordering(&self, params: &dyn ParameterSource, target: &mut dyn QueryTarget) {
        let raw = params.get(&self.sort_field);
        for (key, direction) in resolve_order(raw, &self.orderables, &self.default_order) {
            let resolved = self
                .orderables
                .iter()
                .find(|orderable| orderable.key == key)
                .map(|orderable| &orderable.target);
            match resolved {
                Some(OrderTarget::Handler(name)) => {
                    if let Some(handler) = self.order_handlers.get(name) {
                        handler(target, direction);
                    }
                }
                Some(OrderTarget::Column(column)) => target.order_by(column, direction),
                // Default-order columns need not be declared sortable.
                None => target.order_by(&key, direction),
            }
        }
    }
}

/// Builder for [`Filter`] definitions.
///
/// Registering a filterable couples its name, declared type and handler in
/// one call, so a whitelisted parameter without a handler cannot exist.
pub struct FilterBuilder {
    filterables: Vec<FilterField>,
    searchables: Vec<String>,
    orderables: Vec<Orderable>,
    order_handlers: HashMap<String, OrderHandler>,
    search_field: String,
    sort_field: String,
    default_order: Vec<(String, Order)>,
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self {
            filterables: Vec::new(),
            searchables: Vec::new(),
            orderables: Vec::new(),
            order_handlers: HashMap::new(),
            search_field: "search".to_owned(),
            sort_field: "orderBy".to_owned(),
            default_order: Vec::new(),
        }
    }
}

impl FilterBuilder {
    /// Whitelist a parameter with its declared type and handler.
    /// Registration order is application order.
    #[must_use]
    pub fn filterable(
        mut self,
        name: impl Into<String>,
        kind: FieldType,
        handler: impl Fn(&mut dyn QueryTarget, FilterValue) + Send + Sync + 'static,
    ) -> Self {
        self.filterables.push(FilterField {
            name: name.into(),
            kind,
            handler: Box::new(handler),
        });
        self
    }

    /// Add a searchable field path. A `.` denotes relation traversal, with
    /// the last segment naming the property on the related entity.
    #[must_use]
    pub fn searchable(mut self, path: impl Into<String>) -> Self {
        self.searchables.push(path.into());
        self
    }

    /// Expose a column under its own name as a sort key.
    #[must_use]
    pub fn orderable(self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.orderable_as(column.clone(), column)
    }

    /// Expose a column under a client-facing sort key.
    #[must_use]
    pub fn orderable_as(mut self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.orderables.push(Orderable {
            key: key.into(),
            target: OrderTarget::Column(column.into()),
        });
        self
    }

    /// Expose a sort key backed by a handler, for computed or joined sorts.
    #[must_use]
    pub fn orderable_with(
        mut self,
        key: impl Into<String>,
        handler: impl Fn(&mut dyn QueryTarget, Order) + Send + Sync + 'static,
    ) -> Self {
        let key = key.into();
        self.orderables.push(Orderable {
            key: key.clone(),
            target: OrderTarget::Handler(key.clone()),
        });
        self.order_handlers.insert(key, Box::new(handler));
        self
    }

    /// Override the reserved search parameter name (default `search`).
    #[must_use]
    pub fn search_param(mut self, name: impl Into<String>) -> Self {
        self.search_field = name.into();
        self
    }

    /// Override the reserved sort parameter name (default `orderBy`).
    #[must_use]
    pub fn sort_param(mut self, name: impl Into<String>) -> Self {
        self.sort_field = name.into();
        self
    }

    /// Append a default order key, used when the sort parameter is absent
    /// or resolves to nothing.
    #[must_use]
    pub fn default_order(mut self, column: impl Into<String>, direction: Order) -> Self {
        self.default_order.push((column.into(), direction));
        self
    }

    #[must_use]
    pub fn build(self) -> Filter {
        Filter {
            filterables: self.filterables,
            searchables: self.searchables,
            orderables: self.orderables,
            order_handlers: self.order_handlers,
            search_field: self.search_field,
            sort_field: self.sort_field,
            default_order: self.default_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FilterParams;
    use crate::target::QueryPlan;

    fn plain_filter() -> Filter {
        Filter::builder()
            .filterable("genre", FieldType::String, |query: &mut dyn QueryTarget, value| {
                query.and_where(Expr::col(Alias::new("genre")).eq(value));
            })
            .orderable("name")
            .default_order("name", Order::Asc)
            .build()
    }

    #[test]
    fn whitelisted_parameter_is_applied() {
        let params: FilterParams = [("genre".to_owned(), "fantasy".to_owned())]
            .into_iter()
            .collect();
        let mut plan = QueryPlan::new();
        plain_filter().apply(&params, &mut plan);
        let rendered = format!("{:?}", plan.condition());
        assert!(rendered.contains("genre"), "{rendered}");
        assert!(rendered.contains("fantasy"), "{rendered}");
    }

    #[test]
    fn unknown_parameter_is_never_applied() {
        let params: FilterParams = [("publisher".to_owned(), "acme".to_owned())]
            .into_iter()
            .collect();
        let mut plan = QueryPlan::new();
        plain_filter().apply(&params, &mut plan);
        let rendered = format!("{:?}", plan.condition());
        assert!(!rendered.contains("acme"), "{rendered}");
    }

    #[test]
    fn empty_string_counts_as_present() {
        let params: FilterParams = [("genre".to_owned(), String::new())].into_iter().collect();
        let mut plan = QueryPlan::new();
        plain_filter().apply(&params, &mut plan);
        let rendered = format!("{:?}", plan.condition());
        assert!(rendered.contains("genre"), "{rendered}");
    }

    #[test]
    fn default_order_applies_without_sort_parameter() {
        let params = FilterParams::default();
        let mut plan = QueryPlan::new();
        plain_filter().apply(&params, &mut plan);
        assert_eq!(plan.orders(), &[("name".to_owned(), Order::Asc)]);
    }

    #[test]
    fn search_skipped_when_no_searchables_declared() {
        let params: FilterParams = [("search".to_owned(), "tolkien".to_owned())]
            .into_iter()
            .collect();
        let mut plan = QueryPlan::new();
        plain_filter().apply(&params, &mut plan);
        let rendered = format!("{:?}", plan.condition());
        assert!(!rendered.contains("tolkien"), "{rendered}");
    }
}

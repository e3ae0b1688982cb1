//! Model integration.

use sea_orm::{EntityTrait, Select};

use crate::filtering::engine::Filter;
use crate::params::ParameterSource;
use crate::target::QueryPlan;

/// Wires a filter definition into a query in one call.
pub trait Filterable: Sized {
    /// Run `filter` against `params`, collecting into `plan`, and return the
    /// constrained query. Pre-register relation resolvers on the plan when
    /// searchable paths traverse relations.
    fn apply_filter(self, filter: &Filter, params: &dyn ParameterSource, plan: QueryPlan) -> Self;
}

impl<E: EntityTrait> Filterable for Select<E> {
    fn apply_filter(
        self,
        filter: &Filter,
        params: &dyn ParameterSource,
        mut plan: QueryPlan,
    ) -> Self {
        filter.apply(params, &mut plan);
        plan.apply_to(self)
    }
}

//! Server-side grid query model and evaluation.
//!
//! A [`DataSourceRequest`] describes what the grid wants to show (page, sort
//! order, filter tree, groups and aggregates). [`process`] evaluates one over
//! a slice of JSON records and produces the [`DataSourceResult`] the widget
//! renders.

pub mod aggregate;
mod binding;
mod filter;
pub mod group;
mod process;
pub mod request;
pub mod result;
pub mod sort;
pub mod value;

pub use aggregate::Aggregates;
pub use binding::BindError;
pub use process::process;
pub use request::{
    AggregateDescriptor, AggregateFunction, CompositeFilter, DataSourceRequest, FilterCondition,
    FilterDescriptor, FilterLogic, FilterOperator, GroupDescriptor, SortDescriptor, SortDirection,
};
pub use result::{DataSourceResult, GridData, Group};

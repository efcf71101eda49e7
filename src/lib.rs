//! # gridsource
//!
//! Server-side data operations for grid widgets, served over axum.
//!
//! A grid posts its state (page, sort, filter tree, groups, aggregates) to
//! `POST /json/products`. The request is bound into a [`DataSourceRequest`],
//! handed to the injected [`ProductDao`], and the [`DataSourceResult`] is
//! returned as JSON.
//!
//! ## Features
//!
//! - **Request binding**: bracketed form parameters (`sort[0][field]=...`),
//!   JSON bodies, or the query string
//! - **Query evaluation**: filtering, multi-key sorting, paging, nested
//!   grouping and aggregates over JSON records
//! - **Dependency Injection**: controllers resolve `Arc<dyn ProductDao>` from
//!   a TypeId keyed [`Container`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridsource::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut container = Container::new();
//!     ProductModule::register(&mut container)?;
//!
//!     let router = build_router(&container)?;
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod dao;
pub mod datasource;
pub mod di;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod module;

pub use app::build_router;
pub use controller::JsonController;
pub use dao::{InMemoryProductDao, Product, ProductDao};
pub use datasource::{DataSourceRequest, DataSourceResult};
pub use di::{Container, ContainerBuilder, Injectable};
pub use error::{GridError, Result};
pub use module::{Module, ProductModule};

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use gridsource::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::build_router;
    pub use crate::config::{ConfigService, LogFormat, ServerConfig};
    pub use crate::controller::JsonController;
    pub use crate::dao::{InMemoryProductDao, Product, ProductDao};
    pub use crate::datasource::{
        AggregateDescriptor, AggregateFunction, DataSourceRequest, DataSourceResult,
        FilterCondition, FilterDescriptor, FilterLogic, FilterOperator, GridData, Group,
        GroupDescriptor, SortDescriptor, SortDirection,
    };
    pub use crate::di::{Container, ContainerBuilder, Injectable};
    pub use crate::error::{GridError, Result};
    pub use crate::lifecycle::shutdown_signal;
    pub use crate::module::{Module, ProductModule};
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}

//! Scorta query layer
//!
//! Client-side data layer for the Scorta inventory console: paginated,
//! keyword-filterable views of remote list resources with a
//! stale-while-revalidate cache, request de-duplication, debounced search,
//! and mutation-triggered invalidation.
//!
//! Construct a [`Console`] once at application start and hand out resource
//! handles from it:
//!
//! ```ignore
//! let settings = Settings::load(None)?;
//! let console = Console::new(&settings, Arc::new(StaticToken::new(key)))?;
//! let inventories = console.inventories();
//! inventories.on_query(QueryUpdate::keyword("bolt"));
//! let page = inventories.resolve().await?;
//! ```

pub mod application;
pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::resource::{ResourceHandle, ResourceState};
pub use client::Console;
pub use config::Settings;
pub use domain::query::{ListQuery, QueryUpdate};
pub use infra::api::{AuthProvider, StaticToken};
pub use infra::error::ApiError;

//! Application services: query state, resource handles, mutations.

pub mod controller;
pub mod mutation;
pub mod resource;

//! Delivery Hub Core - Shared domain types.
//!
//! This crate provides the types shared by every Delivery Hub component:
//! - `server` - REST API for customers, vendors, drivers and admins
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP. Database encode/decode impls are behind the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, email, roles, order status, money
//! - [`policy`] - Who may see an order

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod policy;
pub mod types;

pub use types::*;

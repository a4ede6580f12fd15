//! # homehub-domain
//!
//! Pure domain model for the homehub home automation system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Device state** (typed attribute maps, the unit of read, write,
//!   and rollback)
//! - Define the **Device** capability contract (validate-and-apply partial
//!   state updates, unconditional restore)
//! - Define **Scenes** (named ordered macros of device state changes)
//! - Define **Device groups** (named device-name sets for bulk operations)
//! - Define **Access control** (permissions, roles, users)
//! - Define **Events** (audit records of committed hub operations)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, device crates, or external IO
//! crates. Everything here is a finite, in-memory computation.

pub mod error;
pub mod id;
pub mod time;

pub mod access;
pub mod device;
pub mod event;
pub mod group;
pub mod scene;
pub mod state;

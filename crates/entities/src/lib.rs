//! Core entity definitions for OneOnOne.
//!
//! This crate defines the records the scheduling service stores: users, their
//! contacts, event templates, and availability/event timeblocks. Enumerated
//! columns are closed enums; raw client input is checked here before it ever
//! reaches a store.

mod contact;
mod error;
mod event;
mod timeblock;
pub mod timestamp;
mod user;

pub use contact::*;
pub use error::*;
pub use event::*;
pub use timeblock::*;
pub use user::*;

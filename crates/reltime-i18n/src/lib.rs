#![forbid(unsafe_code)]

//! Pluralization engine for reltime.
//!
//! Provides CLDR plural categories, per-locale plural rules, and a small
//! message engine that compiles structured `select`/`plural` pattern trees
//! and evaluates them against named arguments.
//!
//! # How it fits in the system
//! `reltime` synthesizes a direction-aware, plural-aware pattern tree from
//! raw locale field data and hands it to [`CompiledMessage::compile`]. This
//! crate knows nothing about calendar units or locale catalogs, keeping the
//! pluralization layer reusable and testable on its own.

pub mod message;
pub mod plural;

pub use message::{
    ArgValue, CompiledMessage, MessageError, MessagePattern, PluralNode, Segment, SelectNode,
};
pub use plural::{PluralCategory, PluralRule, UnknownCategory, UnknownRule};

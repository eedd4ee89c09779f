//!
//! Shared helpers for rules: token relationships, fix application, the newline
//! decision engine, and the deprecation logger.

pub mod ast_utils;
pub mod fix_utils;
pub mod newline_policy;
pub mod warn_once;


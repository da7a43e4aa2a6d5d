//! CDP page session for interacting with a single page.

mod core;
mod input;
mod keys;
mod navigation;

pub use self::core::PageSession;
pub use self::keys::KeyDefinition;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

//! Terminal UI

pub mod draw;
pub mod form;
pub mod theme;

pub use form::{FormAction, FormState};

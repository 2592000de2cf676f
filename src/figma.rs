//! Read-only access to the Figma REST API.
//!
//! Only the handful of endpoints needed to find card news frames and render
//! them are covered. See [api::FigmaClient].

pub mod api;
pub mod auth;
pub mod error;
pub mod file;
pub mod image;
pub mod link;
pub mod team;

pub use error::FigmaError;

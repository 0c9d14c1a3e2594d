//! Estudio's dashboard visualization library.
//!
//! The library composes the economic dashboard page: a [`layout::View`] owns
//! the drawing surfaces, [`chart::ChartFactory`] binds line charts to them,
//! and the [`render`] module turns the page into HTML driven by Chart.js.
//!
//! **WARNING**: This library is internal to the `estudio` CLI and there are
//! no plans to stabilize it. The API may break at any time without notice.

#![warn(missing_docs)]

pub(crate) mod id;
pub(crate) mod template;

pub mod chart;
pub mod error;
pub mod label;
pub mod layout;
pub mod options;
pub mod refresh;
pub mod render;
pub mod theme;

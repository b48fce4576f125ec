//! A small **Constructive Solid Geometry (CSG)** engine: Boolean operations
//! (*union*, *difference*, *intersection*) on polygon soups, computed with
//! [BSP](mesh::bsp) trees.
//!
//! Every tree walk runs on an explicit work list, so arbitrarily deep trees
//! never overflow the call stack. Polygons carry an integer `shared` tag
//! through every split, letting callers recover which input face each output
//! fragment came from.
//!
//! # Features
//! #### Optional
//! - **parallel**: use rayon to process independent targets in [`batch`] concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod batch;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod soup;
pub mod traits;

pub use errors::SoupError;
pub use mesh::{BooleanOp, BooleanOptions, Mesh};
pub use soup::{PolygonSoup, boolean_soup, boolean_soup_named};
pub use traits::CSG;

//! Scalar field containers consumed by the edgel pipeline.
//!
//! The pipeline never filters the field itself: callers hand in an already
//! smoothed Laplacian response, either owned ([`ScalarGrid`]) or borrowed
//! ([`GridRef`]). Both implement [`GridView`], which is all the downstream
//! stages require.

pub mod grid;
pub mod io;
pub mod traits;

pub use self::grid::{GridRef, ScalarGrid};
pub use self::traits::GridView;

//! All-pairs hop-minimal routes with bottleneck bandwidth tracking.
//!
//! Routes are selected by hop count. Delay is accumulated along whichever
//! hop-minimal path is found first and is never used to choose between
//! paths, mirroring hop-count routing in the simulated network.

pub mod types;
pub mod floyd_warshall;

pub use types::{Bottleneck, Route, UNCONSTRAINED_SENTINEL, UNREACHED_SENTINEL};
pub use floyd_warshall::{RouteError, RouteMatrices};

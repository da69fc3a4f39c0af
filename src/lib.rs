#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod bubble;
pub mod config;
pub mod delaunay;
pub mod error;
pub mod simulation;
mod vector;

pub use app::BubblesApp;
pub use bubble::Bubble;
pub use config::{DegeneratePolicy, SimulationConfig};
pub use error::{GeometryError, SimulationError};
pub use simulation::{AnyFrame, AnySimulation, Frame, FrameSink, RecordingSink, Simulation};

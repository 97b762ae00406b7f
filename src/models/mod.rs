//! Data Models
//!
//! Configuration, operation outcomes, and the render snapshot.

pub mod outcome;
pub mod settings;
pub mod snapshot;

pub use outcome::*;
pub use settings::*;
pub use snapshot::*;

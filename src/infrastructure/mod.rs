pub mod gate;

pub use gate::{GatePermit, ProcessingGate};

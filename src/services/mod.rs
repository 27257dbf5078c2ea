pub mod batch_store;
pub mod result_sink;

pub use batch_store::BatchStore;
pub use result_sink::{DirectorySink, ResultSink};

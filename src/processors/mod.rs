pub mod aggregator;
pub mod parallel_processor;

pub use aggregator::Aggregator;
pub use parallel_processor::ParallelProcessor;

mod dataset;
mod sample;

pub use dataset::Dataset;
pub use sample::Sample;

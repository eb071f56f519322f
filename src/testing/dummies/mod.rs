mod datasets;

pub use datasets::{labeled, parity};

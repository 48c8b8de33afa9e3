pub mod raw;
pub mod series;
pub mod snapshot;
pub mod trend;

pub use raw::*;
pub use series::*;
pub use snapshot::*;
pub use trend::*;

pub mod record;
pub mod report;
pub mod series;
pub mod summary;

pub use record::*;
pub use report::*;
pub use series::*;
pub use summary::*;

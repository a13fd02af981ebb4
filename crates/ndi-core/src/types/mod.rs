mod epoch;
mod query;
mod report;
mod scope;

pub use epoch::*;
pub use query::*;
pub use report::*;
pub use scope::*;

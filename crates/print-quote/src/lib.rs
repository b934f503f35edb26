pub mod binding;
pub mod classify;
pub mod constants;
mod options;
mod pricing;
pub mod range;
mod types;

pub use binding::{soft_fee, spiral_fee};
pub use classify::classify;
pub use options::*;
pub use pricing::{calculate_breakdown, price};
pub use range::{PageSet, PageSpan, RangeError};
pub use types::*;

pub mod compare;
pub mod wildcard;

pub use compare::{ComparisonEvaluator, Ordering};
pub use wildcard::WildcardPattern;

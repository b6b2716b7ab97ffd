pub mod compatibility;

pub use compatibility::{evaluate_class_pick, is_class_allowed, ClassPick, RestrictionPolicy};

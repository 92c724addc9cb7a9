//! Catalog models shared by the customer and admin surfaces

pub mod product;
pub mod promotion;

pub use product::Product;
pub use promotion::{
    PromotionRule, PromotionValidationError, RawPromotionRule, TimeWindow, WeekdaySet,
};

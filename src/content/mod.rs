pub mod fence;
pub mod markdown;

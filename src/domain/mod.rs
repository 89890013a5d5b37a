pub mod examples;
pub mod speech;

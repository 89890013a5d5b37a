pub mod examples;
pub mod extract;
pub mod health;
pub mod speech;
pub mod ui;

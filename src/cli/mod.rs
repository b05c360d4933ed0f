pub mod catalogue;
pub mod quote;
pub mod rate;
pub mod ui;

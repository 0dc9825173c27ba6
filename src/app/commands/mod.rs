pub mod bulk;
pub mod generate;

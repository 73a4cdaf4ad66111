pub mod rank;
pub mod stress;
pub mod template;

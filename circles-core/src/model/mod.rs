pub mod arrangement;
pub mod circle;

pub mod prices;
pub mod reported;

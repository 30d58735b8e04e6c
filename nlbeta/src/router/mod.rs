pub mod batch;
pub mod estimate;
pub mod prices;
pub mod util;
pub mod verify;

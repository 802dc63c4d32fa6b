pub mod bond;
pub mod duration;

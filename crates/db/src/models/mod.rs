pub mod chapter;
pub mod character;
pub mod manga;
pub mod setting;

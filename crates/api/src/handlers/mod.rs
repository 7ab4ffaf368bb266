pub mod admin;
pub mod chapters;
pub mod manga;
pub mod settings;

pub mod chapter_repo;
pub mod character_repo;
pub mod manga_repo;
pub mod setting_repo;

pub use chapter_repo::ChapterRepo;
pub use character_repo::CharacterRepo;
pub use manga_repo::MangaRepo;
pub use setting_repo::SettingRepo;

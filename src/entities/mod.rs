pub mod game_settings;
pub mod play_records;

pub use game_settings as game_setting_entity;
pub use play_records as play_record_entity;

pub mod history_service;
pub mod inventory_service;
pub mod pacing;
pub mod play_service;
pub mod settings_service;

pub use history_service::*;
pub use inventory_service::*;
pub use pacing::*;
pub use play_service::*;
pub use settings_service::*;

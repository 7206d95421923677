pub mod face_mesh_client;
pub mod telegram_notifier;
pub mod vision_rater_client;

/// Recurring session generation
pub mod sessions;

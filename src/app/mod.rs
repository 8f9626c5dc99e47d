pub mod commands;
pub mod events;
pub mod settings;
pub mod state;
pub mod tracker;

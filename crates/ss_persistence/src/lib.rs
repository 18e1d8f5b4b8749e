//! Spawn preset persistence in RON format.

pub mod preset_io;

pub use preset_io::{load_presets, load_settings, save_settings, Preset, PresetIoError, PRESETS_DIR};

pub mod lem;

pub use lem::{presets, LunarModule, LunarModuleBuilder};

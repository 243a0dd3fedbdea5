pub mod config;
pub mod platform;
pub mod screens;
pub mod ui;

// Re-export commonly used types
pub use config::{EnvOverrideMode, Settings};
pub use platform::{PlatformDescriptor, PlatformManager};
pub use screens::ScreenAction;

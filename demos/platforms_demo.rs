//! Headless walkthrough of the platform selection panel against an
//! in-memory catalog. Run with `RUST_LOG=info` to watch the call flow.

use customfloor::config::{self, Settings};
use customfloor::platform::{PlatformDescriptor, PlatformManager};
use customfloor::screens::platform_list::{
    State, ACTION_RELOAD_PLATFORMS, ACTION_SELECT_OVERRIDE, ACTION_SELECT_PLATFORM,
};
use customfloor::screens::ScreenAction;
use log::info;

struct DemoPlatformManager {
    platforms: Vec<PlatformDescriptor>,
    current: usize,
}

impl DemoPlatformManager {
    fn new() -> Self {
        let platforms = vec![
            PlatformDescriptor::new("Base Game", "<none>"),
            PlatformDescriptor::new("Neon Grid", "raven"),
            PlatformDescriptor::new("Sunset Pier", "mika"),
            PlatformDescriptor::new("Void Ring", "tau"),
        ];
        Self {
            platforms,
            current: 0,
        }
    }
}

impl PlatformManager for DemoPlatformManager {
    fn all_platforms(&self) -> &[PlatformDescriptor] {
        &self.platforms
    }

    fn current_platform_index(&self) -> usize {
        self.current
    }

    fn set_platform_and_show(&mut self, index: usize) {
        if let Some(platform) = self.platforms.get(index) {
            self.current = index;
            info!("Now showing platform #{index} '{}'", platform.name);
        } else {
            info!("Ignoring selection of unknown platform #{index}");
        }
    }

    fn change_to_platform(&mut self, index: Option<usize>) {
        let target = index.unwrap_or(self.current);
        if let Some(platform) = self.platforms.get(target) {
            info!("Switching environment to '{}'", platform.name);
        }
    }

    fn reload(&mut self) {
        info!("Rescanning platform catalog ({} platforms)", self.platforms.len());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init();

    let settings = Settings::open(config::CONFIG_PATH);
    let mut manager = DemoPlatformManager::new();
    let mut panel = State::new(settings)?;

    panel.setup_lists(&manager);
    info!(
        "Panel ready: {} platforms, {} override modes, override = {}",
        panel.platform_table().len(),
        panel.override_table().len(),
        panel.env_override_mode()
    );

    panel.on_show(&mut manager);

    // A user picks the second platform, then an override mode.
    panel.handle_action(ACTION_SELECT_PLATFORM, &mut manager, 1);
    if panel.handle_action(ACTION_SELECT_OVERRIDE, &mut manager, 2)
        == ScreenAction::CloseOverrideOverlay
    {
        info!(
            "Override overlay dismissed, mode now {}",
            panel.env_override_mode()
        );
    }

    panel.handle_action(ACTION_RELOAD_PLATFORMS, &mut manager, 0);
    panel.setup_lists(&manager);

    panel.on_hide(&mut manager);
    Ok(())
}

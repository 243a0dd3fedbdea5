use crate::config::{EnvOverrideMode, Settings};
use crate::platform::PlatformManager;
use crate::screens::ScreenAction;
use crate::ui::actions::ActionMap;
use crate::ui::layout::{self, PanelLayout};
use crate::ui::list_table::{ListCell, ListTable};
use log::{info, warn};

/* ------------------------------ layout ------------------------------- */
/// Widget ids this panel requires from its layout resource.
const PLATFORMS_LIST_ID: &str = "platforms";
const OVERRIDES_LIST_ID: &str = "overrides";
const RELOAD_BUTTON_ID: &str = "reload";

/// Action names the shipped `platform_list` layout binds.
pub const ACTION_SELECT_PLATFORM: &str = "select-platform";
pub const ACTION_SELECT_OVERRIDE: &str = "select-override";
pub const ACTION_RELOAD_PLATFORMS: &str = "reload-platforms";

/// The platform selection panel: two selectable lists over the external
/// platform manager, plus the persisted environment-override choice.
pub struct State {
    platform_table: ListTable,
    override_table: ListTable,
    settings: Settings,
    actions: ActionMap<State>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("platform_table", &self.platform_table)
            .field("override_table", &self.override_table)
            .field("actions", &self.actions.len())
            .finish()
    }
}

impl State {
    /// Build the panel from its named layout resource, wiring the callback
    /// table the layout binds.
    pub fn new(settings: Settings) -> Result<Self, String> {
        let layout = layout::load(layout::PLATFORM_LIST_LAYOUT)?;
        Self::from_layout(&layout, settings)
    }

    /// Build the panel from an already-resolved layout. Fails when the
    /// layout is missing a widget this panel requires.
    pub fn from_layout(layout: &PanelLayout, settings: Settings) -> Result<Self, String> {
        let platforms = layout
            .list(PLATFORMS_LIST_ID)
            .ok_or_else(|| format!("layout '{}' has no '{PLATFORMS_LIST_ID}' list", layout.name))?;
        let overrides = layout
            .list(OVERRIDES_LIST_ID)
            .ok_or_else(|| format!("layout '{}' has no '{OVERRIDES_LIST_ID}' list", layout.name))?;
        let reload = layout.button(RELOAD_BUTTON_ID).ok_or_else(|| {
            format!("layout '{}' has no '{RELOAD_BUTTON_ID}' button", layout.name)
        })?;

        let mut actions = ActionMap::new();
        actions.register(&platforms.on_select, Self::platform_select)?;
        actions.register(&overrides.on_select, Self::override_select)?;
        actions.register(&reload.on_press, Self::reload_platforms)?;

        Ok(Self {
            platform_table: ListTable::new(platforms.visible_rows),
            override_table: ListTable::new(overrides.visible_rows),
            settings,
            actions,
        })
    }

    /* --------------------------- bound actions --------------------------- */

    fn platform_select(
        _state: &mut State,
        manager: &mut dyn PlatformManager,
        index: usize,
    ) -> ScreenAction {
        manager.set_platform_and_show(index);
        ScreenAction::None
    }

    fn override_select(
        state: &mut State,
        _manager: &mut dyn PlatformManager,
        index: usize,
    ) -> ScreenAction {
        state
            .settings
            .set_env_override_mode(EnvOverrideMode::from_index(index));
        ScreenAction::CloseOverrideOverlay
    }

    fn reload_platforms(
        _state: &mut State,
        manager: &mut dyn PlatformManager,
        _index: usize,
    ) -> ScreenAction {
        info!("Reloading platform catalog");
        manager.reload();
        ScreenAction::None
    }

    /// Dispatch a named action fired by the host UI. Unknown names are
    /// ignored with a warning; host-originated strings are not trusted to
    /// be total.
    pub fn handle_action(
        &mut self,
        action: &str,
        manager: &mut dyn PlatformManager,
        index: usize,
    ) -> ScreenAction {
        match self.actions.get(action) {
            Some(handler) => handler(self, manager, index),
            None => {
                warn!("Ignoring unbound UI action '{action}'");
                ScreenAction::None
            }
        }
    }

    pub fn is_action_bound(&self, action: &str) -> bool {
        self.actions.is_bound(action)
    }

    /* ----------------------------- lifecycle ----------------------------- */

    /// The host is showing the panel: bring up the configured platform.
    pub fn on_show(&self, manager: &mut dyn PlatformManager) {
        manager.change_to_platform(None);
    }

    /// The host hid the panel: drop back to the base platform.
    pub fn on_hide(&self, manager: &mut dyn PlatformManager) {
        manager.change_to_platform(Some(0));
    }

    /* ---------------------------- (re)populate ---------------------------- */

    /// Rebuild both tables from current catalog and settings state. Safe to
    /// call repeatedly; each call replaces the previous contents.
    pub fn setup_lists(&mut self, manager: &dyn PlatformManager) {
        self.setup_platform_list(manager);
        self.setup_override_list();
    }

    fn setup_platform_list(&mut self, manager: &dyn PlatformManager) {
        self.platform_table.clear();
        for platform in manager.all_platforms() {
            self.platform_table.push_cell(ListCell {
                text: platform.name.clone(),
                subtext: Some(platform.author.clone()),
                icon_texture_key: platform.icon_texture_key.clone(),
            });
        }
        self.platform_table.reload();

        let selected = manager.current_platform_index();
        // Keep the user's scroll position when the selection is already on
        // screen; only jump the window for an off-screen selection.
        if !self.platform_table.has_visible_selection() {
            self.platform_table.scroll_to_cell(selected);
        }
        self.platform_table.select_cell(selected);
    }

    fn setup_override_list(&mut self) {
        self.override_table.clear();
        for mode in EnvOverrideMode::ALL {
            self.override_table.push_cell(ListCell::text_only(mode.name()));
        }
        self.override_table.reload();

        let selected = self.settings.env_override_mode().index();
        if !self.override_table.has_visible_selection() {
            self.override_table.scroll_to_cell(selected);
        }
        self.override_table.select_cell(selected);
    }

    /* ----------------------------- accessors ------------------------------ */

    pub fn platform_table(&self) -> &ListTable {
        &self.platform_table
    }

    pub fn override_table(&self) -> &ListTable {
        &self.override_table
    }

    #[inline(always)]
    pub const fn env_override_mode(&self) -> EnvOverrideMode {
        self.settings.env_override_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::{State, ACTION_RELOAD_PLATFORMS, ACTION_SELECT_OVERRIDE, ACTION_SELECT_PLATFORM};
    use crate::config::{EnvOverrideMode, Settings, SettingsStore};
    use crate::platform::{PlatformDescriptor, PlatformManager};
    use crate::screens::ScreenAction;
    use crate::ui::layout::PanelLayout;

    /// In-memory store with no persistence behavior beyond one integer.
    struct MemStore {
        value: i32,
    }

    impl SettingsStore for MemStore {
        fn get_int(&self, _section: &str, _key: &str, _default: i32) -> i32 {
            self.value
        }
        fn set_int(&mut self, _section: &str, _key: &str, value: i32) {
            self.value = value;
        }
    }

    fn settings_with(value: i32) -> Settings {
        Settings::new(Box::new(MemStore { value }))
    }

    /// Recording fake for the external manager contract.
    #[derive(Default)]
    struct FakeManager {
        platforms: Vec<PlatformDescriptor>,
        current: usize,
        set_and_show_calls: Vec<usize>,
        change_to_calls: Vec<Option<usize>>,
        reload_calls: u32,
    }

    impl FakeManager {
        fn with_platforms(n: usize) -> Self {
            let platforms = (0..n)
                .map(|i| PlatformDescriptor::new(&format!("Platform {i}"), &format!("Author {i}")))
                .collect();
            Self {
                platforms,
                ..Self::default()
            }
        }
    }

    impl PlatformManager for FakeManager {
        fn all_platforms(&self) -> &[PlatformDescriptor] {
            &self.platforms
        }
        fn current_platform_index(&self) -> usize {
            self.current
        }
        fn set_platform_and_show(&mut self, index: usize) {
            self.set_and_show_calls.push(index);
            self.current = index;
        }
        fn change_to_platform(&mut self, index: Option<usize>) {
            self.change_to_calls.push(index);
        }
        fn reload(&mut self) {
            self.reload_calls += 1;
        }
    }

    fn panel_with(settings: Settings) -> State {
        State::new(settings).unwrap()
    }

    #[test]
    fn construction_binds_the_layouts_three_actions() {
        let panel = panel_with(settings_with(0));
        assert!(panel.is_action_bound(ACTION_SELECT_PLATFORM));
        assert!(panel.is_action_bound(ACTION_SELECT_OVERRIDE));
        assert!(panel.is_action_bound(ACTION_RELOAD_PLATFORMS));
        assert!(!panel.is_action_bound("close-everything"));
    }

    #[test]
    fn construction_fails_on_a_layout_missing_required_widgets() {
        let layout: PanelLayout = serde_json::from_str(
            r#"{"name": "broken", "lists": [{"id": "platforms", "visible_rows": 5, "on_select": "select-platform"}]}"#,
        )
        .unwrap();
        let err = State::from_layout(&layout, settings_with(0)).unwrap_err();
        assert!(err.contains("overrides"));
    }

    #[test]
    fn populating_with_n_platforms_yields_n_cells_even_when_repeated() {
        let manager = FakeManager::with_platforms(4);
        let mut panel = panel_with(settings_with(0));

        panel.setup_lists(&manager);
        assert_eq!(panel.platform_table().len(), 4);

        panel.setup_lists(&manager);
        assert_eq!(panel.platform_table().len(), 4);

        let cell = &panel.platform_table().cells()[2];
        assert_eq!(cell.text, "Platform 2");
        assert_eq!(cell.subtext.as_deref(), Some("Author 2"));
    }

    #[test]
    fn populate_selects_the_managers_current_platform() {
        let mut manager = FakeManager::with_platforms(6);
        manager.current = 3;
        let mut panel = panel_with(settings_with(0));

        panel.setup_lists(&manager);
        assert_eq!(panel.platform_table().selected(), Some(3));
    }

    #[test]
    fn populate_scrolls_to_an_off_screen_selection() {
        // Shipped layout shows 7 platform rows; index 10 starts off screen.
        let mut manager = FakeManager::with_platforms(20);
        manager.current = 10;
        let mut panel = panel_with(settings_with(0));

        panel.setup_lists(&manager);
        assert!(panel.platform_table().is_cell_visible(10));
        assert_eq!(panel.platform_table().first_visible(), 10);
    }

    #[test]
    fn repopulate_keeps_the_window_when_the_selection_is_already_visible() {
        let mut manager = FakeManager::with_platforms(20);
        manager.current = 10;
        let mut panel = panel_with(settings_with(0));
        panel.setup_lists(&manager);
        assert_eq!(panel.platform_table().first_visible(), 10);

        // A re-render with the selection still in view must not jump-scroll.
        panel.setup_lists(&manager);
        assert_eq!(panel.platform_table().first_visible(), 10);
    }

    #[test]
    fn override_list_holds_every_mode_name() {
        let manager = FakeManager::with_platforms(1);
        let mut panel = panel_with(settings_with(0));
        panel.setup_lists(&manager);

        let names: Vec<&str> = panel
            .override_table()
            .cells()
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        let expected: Vec<&str> = EnvOverrideMode::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn override_list_selects_the_persisted_mode() {
        let manager = FakeManager::with_platforms(1);
        let mut panel = panel_with(settings_with(4));
        panel.setup_lists(&manager);
        assert_eq!(
            panel.override_table().selected(),
            Some(EnvOverrideMode::Kda.index())
        );
    }

    #[test]
    fn platform_selection_is_forwarded_verbatim() {
        let mut manager = FakeManager::with_platforms(5);
        let mut panel = panel_with(settings_with(0));
        panel.setup_lists(&manager);

        let action = panel.handle_action(ACTION_SELECT_PLATFORM, &mut manager, 2);
        assert_eq!(action, ScreenAction::None);
        assert_eq!(manager.set_and_show_calls, vec![2]);

        // No local range validation: out-of-range goes through untouched.
        panel.handle_action(ACTION_SELECT_PLATFORM, &mut manager, 99);
        assert_eq!(manager.set_and_show_calls, vec![2, 99]);
    }

    #[test]
    fn override_selection_stores_the_ordinal_and_closes_the_overlay() {
        let mut manager = FakeManager::with_platforms(1);
        let mut panel = panel_with(settings_with(0));
        panel.setup_lists(&manager);

        let action = panel.handle_action(ACTION_SELECT_OVERRIDE, &mut manager, 2);
        assert_eq!(action, ScreenAction::CloseOverrideOverlay);
        assert_eq!(panel.env_override_mode(), EnvOverrideMode::from_index(2));
    }

    #[test]
    fn reload_action_reaches_the_manager() {
        let mut manager = FakeManager::with_platforms(1);
        let mut panel = panel_with(settings_with(0));

        panel.handle_action(ACTION_RELOAD_PLATFORMS, &mut manager, 0);
        assert_eq!(manager.reload_calls, 1);
    }

    #[test]
    fn unknown_actions_are_ignored() {
        let mut manager = FakeManager::with_platforms(1);
        let mut panel = panel_with(settings_with(0));

        let action = panel.handle_action("teleport", &mut manager, 0);
        assert_eq!(action, ScreenAction::None);
        assert!(manager.set_and_show_calls.is_empty());
        assert_eq!(manager.reload_calls, 0);
    }

    #[test]
    fn show_and_hide_drive_the_manager() {
        let mut manager = FakeManager::with_platforms(3);
        let panel = panel_with(settings_with(0));

        panel.on_show(&mut manager);
        panel.on_hide(&mut manager);
        assert_eq!(manager.change_to_calls, vec![None, Some(0)]);
    }
}

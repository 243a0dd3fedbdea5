pub mod platform_list;

/// What a panel asks its host to do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    /// Dismiss the override-mode overlay the host opened above the panel.
    CloseOverrideOverlay,
}

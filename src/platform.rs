/// A selectable visual stage/environment package, as projected into the
/// selection UI. The catalog entry itself is owned by the platform manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub name: String,
    pub author: String,
    /// Texture key for the list icon, when the platform ships one.
    pub icon_texture_key: Option<String>,
}

impl PlatformDescriptor {
    pub fn new(name: &str, author: &str) -> Self {
        Self {
            name: name.to_string(),
            author: author.to_string(),
            icon_texture_key: None,
        }
    }
}

/// The collaborator owning platform catalog state and environment switching.
///
/// The panel forwards selections here without validating indices; range
/// handling belongs to the implementation behind this trait.
pub trait PlatformManager {
    /// Full ordered catalog of known platforms.
    fn all_platforms(&self) -> &[PlatformDescriptor];

    /// Index of the currently active platform within `all_platforms`.
    fn current_platform_index(&self) -> usize;

    /// Make `index` the active platform and display it immediately.
    fn set_platform_and_show(&mut self, index: usize);

    /// Switch to `index`, or to the currently configured platform when `None`.
    fn change_to_platform(&mut self, index: Option<usize>);

    /// Re-scan the platform catalog.
    fn reload(&mut self);
}

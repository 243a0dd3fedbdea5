use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::sync::LazyLock;

/// Declarative description of a selection panel: which list widgets exist,
/// how many rows each shows, and which named action every widget fires.
/// Markup and geometry live with the host's renderer, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelLayout {
    pub name: String,
    pub lists: Vec<ListSpec>,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListSpec {
    pub id: String,
    pub visible_rows: usize,
    pub on_select: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ButtonSpec {
    pub id: String,
    pub on_press: String,
}

impl PanelLayout {
    pub fn list(&self, id: &str) -> Option<&ListSpec> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn button(&self, id: &str) -> Option<&ButtonSpec> {
        self.buttons.iter().find(|b| b.id == id)
    }
}

/// Resource name of the platform selection panel layout.
pub const PLATFORM_LIST_LAYOUT: &str = "platform_list";

static LAYOUT_SOURCES: LazyLock<FxHashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut sources = FxHashMap::default();
    sources.insert(
        PLATFORM_LIST_LAYOUT,
        include_str!("../../assets/layouts/platform_list.json"),
    );
    sources
});

/// Resolve an embedded layout resource by name.
pub fn load(name: &str) -> Result<PanelLayout, String> {
    let source = LAYOUT_SOURCES
        .get(name)
        .ok_or_else(|| format!("unknown layout resource '{name}'"))?;
    serde_json::from_str(source).map_err(|e| format!("layout resource '{name}' is malformed: {e}"))
}

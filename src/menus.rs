//! Menu entries and hotkeys the plugin registers with the host.

pub const MENU_ID_TOGGLE_MUTE: i32 = 1;
pub const MENU_ID_TOGGLE_RENAME: i32 = 2;

pub const HOTKEY_TOGGLE_MUTE: &str = "toggleFakeMuter";

/// Where the host shows a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Global,
    Channel,
    Client,
}

impl MenuKind {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(MenuKind::Global),
            1 => Some(MenuKind::Channel),
            2 => Some(MenuKind::Client),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            MenuKind::Global => 0,
            MenuKind::Channel => 1,
            MenuKind::Client => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub kind: MenuKind,
    pub id: i32,
    pub text: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyEntry {
    pub keyword: &'static str,
    pub description: &'static str,
}

pub const MENU_ENTRIES: &[MenuEntry] = &[
    MenuEntry {
        kind: MenuKind::Global,
        id: MENU_ID_TOGGLE_MUTE,
        text: "Enable/Disable",
        icon: "",
    },
    MenuEntry {
        kind: MenuKind::Global,
        id: MENU_ID_TOGGLE_RENAME,
        text: "Enable/Disable Name Changing",
        icon: "",
    },
];

pub const MENU_ICON: &str = "";

pub const HOTKEYS: &[HotkeyEntry] = &[HotkeyEntry {
    keyword: HOTKEY_TOGGLE_MUTE,
    description: "Toggle the Plugin",
}];

/// User intent behind a menu click or hotkey press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleMute,
    ToggleRename,
}

impl Action {
    pub fn from_menu(kind: MenuKind, id: i32) -> Option<Self> {
        match (kind, id) {
            (MenuKind::Global, MENU_ID_TOGGLE_MUTE) => Some(Action::ToggleMute),
            (MenuKind::Global, MENU_ID_TOGGLE_RENAME) => Some(Action::ToggleRename),
            _ => None,
        }
    }

    pub fn from_hotkey(keyword: &str) -> Option<Self> {
        (keyword == HOTKEY_TOGGLE_MUTE).then_some(Action::ToggleMute)
    }
}

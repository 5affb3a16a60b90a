mod debug;
pub mod dsp;
pub mod ffi;
pub mod gate;
pub mod host;
pub mod menus;
pub mod nickname;
pub mod settings;

use crate::gate::MuteGate;
use crate::host::{Host, HostDirectories, HostPaths};
use crate::menus::{Action, MenuKind};
use crate::settings::Settings;
use log::{debug, info};

pub use crate::debug::{init_logger, LogSink};
pub use crate::gate::{MuteState, RenameOutcome};

pub const PLUGIN_NAME: &str = "FakeMuter";
pub const PLUGIN_VERSION: &str = "1.0";
pub const PLUGIN_AUTHOR: &str = "Exp";
pub const PLUGIN_DESCRIPTION: &str = "Mute yourself while being able to see who's talking.";
pub const PLUGIN_API_VERSION: i32 = 22;

#[cfg(feature = "debug")]
#[global_allocator]
static ALLOCATOR: assert_no_alloc::AllocDisabler = assert_no_alloc::AllocDisabler;

/// Callbacks the host drives once the plugin is loaded.
pub trait PluginEvents {
    fn on_menu_item(&self, host: &impl Host, kind: MenuKind, menu_id: i32);

    fn on_hotkey(&self, host: &impl Host, keyword: &str);

    /// Returns whether `samples` was modified.
    fn on_captured_voice(&self, samples: &mut [i16]) -> bool;
}

/// Plugin instance owned by the host adapter between init and shutdown.
pub struct FakeMuterPlugin {
    gate: MuteGate,
    settings: Settings,
    paths: HostPaths,
}

impl Default for FakeMuterPlugin {
    fn default() -> Self {
        Self::new(Settings::default(), HostPaths::default())
    }
}

impl FakeMuterPlugin {
    pub fn new(settings: Settings, paths: HostPaths) -> Self {
        let gate = MuteGate::new(
            settings.rename_on_toggle,
            &settings.mute_suffix,
            settings.announce,
        );
        Self {
            gate,
            settings,
            paths,
        }
    }

    /// Queries the host directories and reads the settings file from the config path.
    pub fn initialize(dirs: &impl HostDirectories, plugin_id: &str) -> Self {
        let paths = HostPaths::query(dirs, plugin_id);
        debug!(
            "app path {}, resources {}, config {}, plugin {}",
            paths.app.display(),
            paths.resources.display(),
            paths.config.display(),
            paths.plugin.display()
        );
        let settings = Settings::load_or_default(&paths.config);
        info!("{} {} initialized", PLUGIN_NAME, PLUGIN_VERSION);
        Self::new(settings, paths)
    }

    pub fn gate(&self) -> &MuteGate {
        &self.gate
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paths(&self) -> &HostPaths {
        &self.paths
    }

    fn dispatch(&self, host: &impl Host, action: Action) {
        match action {
            Action::ToggleMute => {
                self.gate.toggle_mute(host);
            }
            Action::ToggleRename => {
                self.gate.toggle_rename();
            }
        }
    }
}

impl PluginEvents for FakeMuterPlugin {
    fn on_menu_item(&self, host: &impl Host, kind: MenuKind, menu_id: i32) {
        match Action::from_menu(kind, menu_id) {
            Some(action) => self.dispatch(host, action),
            None => debug!("ignoring menu item {} ({:?})", menu_id, kind),
        }
    }

    fn on_hotkey(&self, host: &impl Host, keyword: &str) {
        match Action::from_hotkey(keyword) {
            Some(action) => self.dispatch(host, action),
            None => debug!("ignoring hotkey {:?}", keyword),
        }
    }

    #[inline]
    fn on_captured_voice(&self, samples: &mut [i16]) -> bool {
        #[cfg(feature = "debug")]
        return assert_no_alloc::assert_no_alloc(|| {
            dsp::apply_mute_transform(samples, self.gate.is_muted())
        });

        #[cfg(not(feature = "debug"))]
        dsp::apply_mute_transform(samples, self.gate.is_muted())
    }
}

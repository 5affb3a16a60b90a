//! Exported `ts3plugin_*` symbols.
//!
//! The client loads the library and calls these in a fixed order:
//! metadata queries, `setFunctionPointers`, `registerPluginID`, `init`,
//! menu and hotkey registration, then events until `shutdown`. The statics
//! below are the only process-wide state; everything else hangs off the
//! `FakeMuterPlugin` instance created in `init`.

#![allow(non_snake_case)]

pub mod alloc;
pub mod host;
pub mod sys;

use self::alloc::{alloc_block, alloc_ptr_array, alloc_value, copy_to_c_buf, free_block};
use self::host::Ts3Host;
use self::sys::*;
use crate::menus::{MenuKind, HOTKEYS, MENU_ENTRIES, MENU_ICON};
use crate::{init_logger, FakeMuterPlugin, PluginEvents, PLUGIN_API_VERSION, PLUGIN_NAME};
use log::{info, warn, Level};
use once_cell::sync::OnceCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_short, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Mutex, RwLock};

static FUNCTIONS: OnceCell<Ts3Functions> = OnceCell::new();
static PLUGIN_ID: Mutex<Option<String>> = Mutex::new(None);
static INSTANCE: RwLock<Option<FakeMuterPlugin>> = RwLock::new(None);

/// Runs a callback body, turning a panic into `fallback`.
fn guarded<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or(fallback)
}

fn ts3_host() -> Option<Ts3Host> {
    FUNCTIONS.get().map(Ts3Host::new)
}

fn host_log_sink(message: &str, level: Level) {
    let Some(log_message) = FUNCTIONS.get().and_then(|f| f.log_message) else {
        return;
    };
    let severity = match level {
        Level::Error => LOG_LEVEL_ERROR,
        Level::Warn => LOG_LEVEL_WARNING,
        Level::Info => LOG_LEVEL_INFO,
        Level::Debug => LOG_LEVEL_DEBUG,
        Level::Trace => LOG_LEVEL_DEVEL,
    };
    let Ok(message) = CString::new(message.replace('\0', " ")) else {
        return;
    };
    unsafe { log_message(message.as_ptr(), severity, c"FakeMuter".as_ptr(), 0) };
}

/// Runs `f` against the live instance and the host, if both exist.
fn with_plugin(f: impl FnOnce(&FakeMuterPlugin, &Ts3Host)) {
    let Some(host) = ts3_host() else {
        return;
    };
    let Ok(guard) = INSTANCE.read() else {
        return;
    };
    if let Some(plugin) = guard.as_ref() {
        f(plugin, &host);
    }
}

// =============================================================================
// Required functions
// =============================================================================

#[no_mangle]
pub extern "C" fn ts3plugin_name() -> *const c_char {
    c"FakeMuter".as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_version() -> *const c_char {
    c"1.0".as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_apiVersion() -> c_int {
    PLUGIN_API_VERSION
}

#[no_mangle]
pub extern "C" fn ts3plugin_author() -> *const c_char {
    c"Exp".as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_description() -> *const c_char {
    c"Mute yourself while being able to see who's talking.".as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_setFunctionPointers(funcs: Ts3Functions) {
    if FUNCTIONS.set(funcs).is_err() {
        warn!("function table already set, keeping the first one");
    }
}

#[no_mangle]
pub extern "C" fn ts3plugin_init() -> c_int {
    guarded(1, || {
        let Some(host) = ts3_host() else {
            return 1;
        };
        init_logger(host_log_sink);

        let plugin_id = PLUGIN_ID
            .lock()
            .map(|id| id.clone().unwrap_or_default())
            .unwrap_or_default();
        let plugin = FakeMuterPlugin::initialize(&host, &plugin_id);

        match INSTANCE.write() {
            Ok(mut instance) => {
                *instance = Some(plugin);
                0
            }
            Err(_) => 1,
        }
    })
}

#[no_mangle]
pub extern "C" fn ts3plugin_shutdown() {
    guarded((), || {
        if let Ok(mut instance) = INSTANCE.write() {
            instance.take();
        }
        if let Ok(mut id) = PLUGIN_ID.lock() {
            id.take();
        }
        info!("{} shut down", PLUGIN_NAME);
    })
}

// =============================================================================
// Optional functions
// =============================================================================

#[no_mangle]
pub extern "C" fn ts3plugin_offersConfigure() -> c_int {
    PLUGIN_OFFERS_NO_CONFIGURE
}

#[no_mangle]
pub unsafe extern "C" fn ts3plugin_registerPluginID(id: *const c_char) {
    if id.is_null() {
        return;
    }
    let id = CStr::from_ptr(id).to_string_lossy().into_owned();
    if let Ok(mut slot) = PLUGIN_ID.lock() {
        *slot = Some(id);
    }
}

#[no_mangle]
pub extern "C" fn ts3plugin_commandKeyword() -> *const c_char {
    c"".as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn ts3plugin_freeMemory(data: *mut c_void) {
    free_block(data.cast());
}

#[no_mangle]
pub extern "C" fn ts3plugin_infoTitle() -> *const c_char {
    c"FakeMuter".as_ptr()
}

#[no_mangle]
pub extern "C" fn ts3plugin_requestAutoload() -> c_int {
    0
}

/// Builds the null-terminated menu item array and the menu icon name.
///
/// # Safety
/// Both out-pointers must be valid for writes. The host releases the results
/// with `ts3plugin_freeMemory`.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_initMenus(
    menu_items: *mut *mut *mut PluginMenuItem,
    menu_icon: *mut *mut c_char,
) {
    if menu_items.is_null() || menu_icon.is_null() {
        return;
    }
    let items = alloc_ptr_array::<PluginMenuItem>(MENU_ENTRIES.len());
    if !items.is_null() {
        for (i, entry) in MENU_ENTRIES.iter().enumerate() {
            let mut item = PluginMenuItem {
                type_: entry.kind.as_raw(),
                id: entry.id,
                text: [0; PLUGIN_MENU_BUFSZ],
                icon: [0; PLUGIN_MENU_BUFSZ],
            };
            copy_to_c_buf(&mut item.text, entry.text);
            copy_to_c_buf(&mut item.icon, entry.icon);
            *items.add(i) = alloc_value(item);
        }
    }
    *menu_items = items;

    let icon = alloc_block(PLUGIN_MENU_BUFSZ) as *mut c_char;
    if !icon.is_null() {
        copy_to_c_buf(
            std::slice::from_raw_parts_mut(icon, PLUGIN_MENU_BUFSZ),
            MENU_ICON,
        );
    }
    *menu_icon = icon;
}

/// Builds the null-terminated hotkey array.
///
/// # Safety
/// `hotkeys` must be valid for writes. The host releases the result with
/// `ts3plugin_freeMemory`.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_initHotkeys(hotkeys: *mut *mut *mut PluginHotkey) {
    if hotkeys.is_null() {
        return;
    }
    let keys = alloc_ptr_array::<PluginHotkey>(HOTKEYS.len());
    if !keys.is_null() {
        for (i, entry) in HOTKEYS.iter().enumerate() {
            let mut hotkey = PluginHotkey {
                keyword: [0; PLUGIN_HOTKEY_BUFSZ],
                description: [0; PLUGIN_HOTKEY_BUFSZ],
            };
            copy_to_c_buf(&mut hotkey.keyword, entry.keyword);
            copy_to_c_buf(&mut hotkey.description, entry.description);
            *keys.add(i) = alloc_value(hotkey);
        }
    }
    *hotkeys = keys;
}

// =============================================================================
// Client callbacks
// =============================================================================

#[no_mangle]
pub extern "C" fn ts3plugin_onMenuItemEvent(
    _server_connection_handler_id: uint64,
    menu_type: c_int,
    menu_item_id: c_int,
    _selected_item_id: uint64,
) {
    guarded((), || {
        let Some(kind) = MenuKind::from_raw(menu_type) else {
            return;
        };
        with_plugin(|plugin, host| plugin.on_menu_item(host, kind, menu_item_id));
    })
}

#[no_mangle]
pub unsafe extern "C" fn ts3plugin_onHotkeyEvent(keyword: *const c_char) {
    if keyword.is_null() {
        return;
    }
    let keyword = CStr::from_ptr(keyword).to_string_lossy();
    guarded((), || {
        with_plugin(|plugin, host| plugin.on_hotkey(host, &keyword));
    })
}

/// Silences the microphone buffer before the client encodes it.
///
/// # Safety
/// `samples` must hold `sample_count * channels` interleaved samples and
/// `edited` must be null or valid for reads and writes.
#[no_mangle]
pub unsafe extern "C" fn ts3plugin_onEditCapturedVoiceDataEvent(
    _server_connection_handler_id: uint64,
    samples: *mut c_short,
    sample_count: c_int,
    channels: c_int,
    edited: *mut c_int,
) {
    let len = crate::dsp::interleaved_len(sample_count, channels);
    if samples.is_null() || len == 0 {
        return;
    }
    let changed = guarded(false, || {
        // Never block the audio thread: during init/shutdown audio passes through
        let Ok(guard) = INSTANCE.try_read() else {
            return false;
        };
        let Some(plugin) = guard.as_ref() else {
            return false;
        };
        let buffer = std::slice::from_raw_parts_mut(samples, len);
        plugin.on_captured_voice(buffer)
    });
    if changed && !edited.is_null() {
        *edited |= VOICE_DATA_EDITED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use crate::{PLUGIN_AUTHOR, PLUGIN_DESCRIPTION, PLUGIN_VERSION};

    fn text(p: *const c_char) -> String {
        unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned()
    }

    #[test]
    fn test_metadata() {
        assert_eq!(text(ts3plugin_name()), PLUGIN_NAME);
        assert_eq!(text(ts3plugin_version()), PLUGIN_VERSION);
        assert_eq!(text(ts3plugin_author()), PLUGIN_AUTHOR);
        assert_eq!(text(ts3plugin_description()), PLUGIN_DESCRIPTION);
        assert_eq!(text(ts3plugin_commandKeyword()), "");
        assert_eq!(text(ts3plugin_infoTitle()), PLUGIN_NAME);
        assert_eq!(ts3plugin_apiVersion(), 22);
        assert_eq!(ts3plugin_offersConfigure(), PLUGIN_OFFERS_NO_CONFIGURE);
        assert_eq!(ts3plugin_requestAutoload(), 0);
    }

    #[test]
    fn test_menus_are_registered_and_freed() {
        let mut items: *mut *mut PluginMenuItem = std::ptr::null_mut();
        let mut icon: *mut c_char = std::ptr::null_mut();
        unsafe {
            ts3plugin_initMenus(&mut items, &mut icon);
            assert!(!items.is_null());
            assert_eq!(text(icon), "");

            let first = &**items;
            assert_eq!(first.type_, 0);
            assert_eq!(first.id, 1);
            assert_eq!(text(first.text.as_ptr()), "Enable/Disable");

            let second = &**items.add(1);
            assert_eq!(second.id, 2);
            assert_eq!(text(second.text.as_ptr()), "Enable/Disable Name Changing");
            assert!((*items.add(2)).is_null());

            for i in 0..2 {
                ts3plugin_freeMemory((*items.add(i)).cast());
            }
            ts3plugin_freeMemory(items.cast());
            ts3plugin_freeMemory(icon.cast());
        }
    }

    #[test]
    fn test_hotkeys_are_registered() {
        let mut keys: *mut *mut PluginHotkey = std::ptr::null_mut();
        unsafe {
            ts3plugin_initHotkeys(&mut keys);
            let hotkey = &**keys;
            assert_eq!(text(hotkey.keyword.as_ptr()), "toggleFakeMuter");
            assert_eq!(text(hotkey.description.as_ptr()), "Toggle the Plugin");
            assert!((*keys.add(1)).is_null());
            ts3plugin_freeMemory((*keys).cast());
            ts3plugin_freeMemory(keys.cast());
        }
    }

    #[test]
    fn test_captured_voice_event() {
        let mut samples: Vec<c_short> = vec![100, -100, 2000, -2000, 7, 9];
        let mut edited: c_int = 0x2;

        // No instance yet: pass-through
        unsafe {
            ts3plugin_onEditCapturedVoiceDataEvent(1, samples.as_mut_ptr(), 3, 2, &mut edited);
        }
        assert_eq!(samples, vec![100, -100, 2000, -2000, 7, 9]);
        assert_eq!(edited, 0x2);

        let plugin = FakeMuterPlugin::default();
        plugin.gate().toggle_mute(&MockHost::named("Alice"));
        *INSTANCE.write().unwrap() = Some(plugin);

        // Only the first frame of stereo is covered
        unsafe {
            ts3plugin_onEditCapturedVoiceDataEvent(1, samples.as_mut_ptr(), 1, 2, &mut edited);
        }
        assert_eq!(samples, vec![0, 0, 2000, -2000, 7, 9]);
        assert_eq!(edited, 0x3);

        unsafe {
            ts3plugin_onEditCapturedVoiceDataEvent(1, samples.as_mut_ptr(), 3, 2, std::ptr::null_mut());
            ts3plugin_onEditCapturedVoiceDataEvent(1, samples.as_mut_ptr(), -3, 2, &mut edited);
        }
        assert_eq!(samples, vec![0; 6]);

        INSTANCE.write().unwrap().take();
    }

    #[test]
    fn test_plugin_id_registration() {
        unsafe { ts3plugin_registerPluginID(c"fake_muter-test".as_ptr()) };
        assert_eq!(
            PLUGIN_ID.lock().unwrap().as_deref(),
            Some("fake_muter-test")
        );
        unsafe { ts3plugin_registerPluginID(std::ptr::null()) };
        assert_eq!(
            PLUGIN_ID.lock().unwrap().as_deref(),
            Some("fake_muter-test")
        );
    }
}

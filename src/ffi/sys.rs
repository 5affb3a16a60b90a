//! C structures shared with the TeamSpeak 3 client (plugin API 22).

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

pub type uint64 = u64;
pub type anyID = u16;

pub const ERROR_OK: c_uint = 0;

pub const PLUGIN_MENU_BUFSZ: usize = 128;
pub const PLUGIN_HOTKEY_BUFSZ: usize = 128;
pub const PATH_BUFSIZE: usize = 512;

pub const PLUGIN_OFFERS_NO_CONFIGURE: c_int = 0;

/// `ClientProperties::CLIENT_NICKNAME`
pub const CLIENT_NICKNAME: usize = 1;

/// Bit set in `edited` when the plugin changed a captured voice buffer.
pub const VOICE_DATA_EDITED: c_int = 0x1;

// `enum LogLevel`
pub const LOG_LEVEL_ERROR: c_int = 1;
pub const LOG_LEVEL_WARNING: c_int = 2;
pub const LOG_LEVEL_DEBUG: c_int = 3;
pub const LOG_LEVEL_INFO: c_int = 4;
pub const LOG_LEVEL_DEVEL: c_int = 5;

#[repr(C)]
#[derive(Clone, Copy)]
pub struct PluginMenuItem {
    pub type_: c_int,
    pub id: c_int,
    pub text: [c_char; PLUGIN_MENU_BUFSZ],
    pub icon: [c_char; PLUGIN_MENU_BUFSZ],
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct PluginHotkey {
    pub keyword: [c_char; PLUGIN_HOTKEY_BUFSZ],
    pub description: [c_char; PLUGIN_HOTKEY_BUFSZ],
}

/// Table entry the plugin never calls.
pub type Unused = Option<unsafe extern "C" fn()>;

/// Host function table, declared up to the last entry the plugin calls.
///
/// The host passes the whole table by value as the only argument of
/// `ts3plugin_setFunctionPointers`, so reading a leading prefix of it is
/// sound. Unused entries are grouped by the sections of `ts3_functions.h`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Ts3Functions {
    /// getClientLibVersion .. destroyServerConnectionHandler
    pub _clientlib: [Unused; 4],
    pub _get_error_message: Unused,
    pub free_memory: Option<unsafe extern "C" fn(pointer: *mut c_void) -> c_uint>,
    pub log_message: Option<
        unsafe extern "C" fn(
            message: *const c_char,
            severity: c_int,
            channel: *const c_char,
            log_id: uint64,
        ) -> c_uint,
    >,
    /// Device lists, playback/capture devices, wave files, custom devices
    pub _sound: [Unused; 26],
    /// Preprocessor, encoder, playback, recording and 3D positioning
    pub _voice_config: [Unused; 13],
    /// startConnection .. requestServerTemporaryPasswordList
    pub _server_requests: [Unused; 27],
    pub get_client_id:
        Option<unsafe extern "C" fn(server_connection_handler_id: uint64, result: *mut anyID) -> c_uint>,
    pub _get_client_self_variable_as_int: Unused,
    pub get_client_self_variable_as_string: Option<
        unsafe extern "C" fn(
            server_connection_handler_id: uint64,
            flag: usize,
            result: *mut *mut c_char,
        ) -> c_uint,
    >,
    pub _set_client_self_variable_as_int: Unused,
    pub set_client_self_variable_as_string: Option<
        unsafe extern "C" fn(
            server_connection_handler_id: uint64,
            flag: usize,
            value: *const c_char,
        ) -> c_uint,
    >,
    pub flush_client_self_updates: Option<
        unsafe extern "C" fn(server_connection_handler_id: uint64, return_code: *const c_char) -> c_uint,
    >,
    /// Client, channel, server and connection info, file transfer, offline
    /// messages, passwords, bans, complaints, permissions, property helpers
    pub _info_and_permissions: [Unused; 100],
    pub get_app_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_resources_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_config_path: Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize)>,
    pub get_plugin_path:
        Option<unsafe extern "C" fn(path: *mut c_char, max_len: usize, plugin_id: *const c_char)>,
    pub get_current_server_connection_handler_id: Option<unsafe extern "C" fn() -> uint64>,
    pub _print_message: Unused,
    pub print_message_to_current_tab: Option<unsafe extern "C" fn(message: *const c_char)>,
}

//! Host capabilities backed by the client's function table.

use super::sys::{self, Ts3Functions, CLIENT_NICKNAME, ERROR_OK, PATH_BUFSIZE};
use crate::host::{
    ClientId, ClientIdentity, ConnectionId, HostDirectories, HostError, StatusNotice,
};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_uint};
use std::path::PathBuf;
use std::ptr;

#[derive(Clone, Copy)]
pub struct Ts3Host {
    funcs: &'static Ts3Functions,
}

fn check(function: &'static str, code: c_uint) -> Result<(), HostError> {
    if code == ERROR_OK {
        Ok(())
    } else {
        Err(HostError::Call { function, code })
    }
}

fn required<F>(f: Option<F>, function: &'static str) -> Result<F, HostError> {
    f.ok_or(HostError::Unavailable(function))
}

/// Lossy UTF-8 copy of a host-filled path buffer.
fn read_path(fill: impl FnOnce(*mut c_char, usize)) -> PathBuf {
    let mut buf = [0 as c_char; PATH_BUFSIZE];
    fill(buf.as_mut_ptr(), PATH_BUFSIZE);
    buf[PATH_BUFSIZE - 1] = 0;
    let path = unsafe { CStr::from_ptr(buf.as_ptr()) };
    PathBuf::from(path.to_string_lossy().into_owned())
}

impl Ts3Host {
    pub fn new(funcs: &'static Ts3Functions) -> Self {
        Self { funcs }
    }

    /// Releases memory the host allocated on our behalf.
    fn release(&self, p: *mut c_char) {
        if p.is_null() {
            return;
        }
        if let Some(free_memory) = self.funcs.free_memory {
            unsafe { free_memory(p.cast()) };
        }
    }
}

impl ClientIdentity for Ts3Host {
    fn current_connection(&self) -> ConnectionId {
        match self.funcs.get_current_server_connection_handler_id {
            Some(f) => unsafe { f() },
            None => 0,
        }
    }

    fn own_client_id(&self, connection: ConnectionId) -> Result<ClientId, HostError> {
        let f = required(self.funcs.get_client_id, "getClientID")?;
        let mut id: sys::anyID = 0;
        check("getClientID", unsafe { f(connection, &mut id) })?;
        Ok(id)
    }

    fn self_nickname(&self, connection: ConnectionId) -> Result<String, HostError> {
        const NAME: &str = "getClientSelfVariableAsString";
        let f = required(self.funcs.get_client_self_variable_as_string, NAME)?;
        let mut raw: *mut c_char = ptr::null_mut();
        check(NAME, unsafe { f(connection, CLIENT_NICKNAME, &mut raw) })?;
        if raw.is_null() {
            return Err(HostError::NullResult(NAME));
        }
        let nickname = unsafe { CStr::from_ptr(raw) }
            .to_string_lossy()
            .into_owned();
        self.release(raw);
        Ok(nickname)
    }

    fn set_self_nickname(&self, connection: ConnectionId, nickname: &str) -> Result<(), HostError> {
        const NAME: &str = "setClientSelfVariableAsString";
        let f = required(self.funcs.set_client_self_variable_as_string, NAME)?;
        let value = CString::new(nickname)?;
        check(NAME, unsafe { f(connection, CLIENT_NICKNAME, value.as_ptr()) })
    }

    fn flush_self_updates(&self, connection: ConnectionId) -> Result<(), HostError> {
        const NAME: &str = "flushClientSelfUpdates";
        let f = required(self.funcs.flush_client_self_updates, NAME)?;
        check(NAME, unsafe { f(connection, ptr::null()) })
    }
}

impl StatusNotice for Ts3Host {
    fn print_to_current_tab(&self, message: &str) {
        let Some(f) = self.funcs.print_message_to_current_tab else {
            return;
        };
        match CString::new(message) {
            Ok(message) => unsafe { f(message.as_ptr()) },
            Err(e) => log::warn!("status notice not shown: {}", e),
        }
    }
}

impl HostDirectories for Ts3Host {
    fn app_path(&self) -> PathBuf {
        match self.funcs.get_app_path {
            Some(f) => read_path(|buf, len| unsafe { f(buf, len) }),
            None => PathBuf::new(),
        }
    }

    fn resources_path(&self) -> PathBuf {
        match self.funcs.get_resources_path {
            Some(f) => read_path(|buf, len| unsafe { f(buf, len) }),
            None => PathBuf::new(),
        }
    }

    fn config_path(&self) -> PathBuf {
        match self.funcs.get_config_path {
            Some(f) => read_path(|buf, len| unsafe { f(buf, len) }),
            None => PathBuf::new(),
        }
    }

    fn plugin_path(&self, plugin_id: &str) -> PathBuf {
        let (Some(f), Ok(id)) = (self.funcs.get_plugin_path, CString::new(plugin_id)) else {
            return PathBuf::new();
        };
        read_path(|buf, len| unsafe { f(buf, len, id.as_ptr()) })
    }
}

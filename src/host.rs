//! Capabilities the plugin needs from the voice-chat client.
//!
//! The core never talks to the host's function table directly. It goes
//! through these traits, which the FFI layer implements over the table and
//! the tests implement with a recording mock.

use std::path::PathBuf;
use thiserror::Error;

/// Server connection handler id as handed out by the host.
pub type ConnectionId = u64;

/// Client id of the local user on a given connection.
pub type ClientId = u16;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("host function {function} failed with error code {code:#06x}")]
    Call { function: &'static str, code: u32 },
    #[error("host function {0} is not available")]
    Unavailable(&'static str),
    #[error("host function {0} returned no data")]
    NullResult(&'static str),
    #[error("string contains an interior NUL byte")]
    InteriorNul(#[from] std::ffi::NulError),
}

/// Read and write access to the local client's identity.
pub trait ClientIdentity {
    fn current_connection(&self) -> ConnectionId;

    fn own_client_id(&self, connection: ConnectionId) -> Result<ClientId, HostError>;

    fn self_nickname(&self, connection: ConnectionId) -> Result<String, HostError>;

    fn set_self_nickname(&self, connection: ConnectionId, nickname: &str) -> Result<(), HostError>;

    /// Commits pending self-variable changes so other clients see them.
    fn flush_self_updates(&self, connection: ConnectionId) -> Result<(), HostError>;
}

/// One-line notices shown in the active conversation tab.
pub trait StatusNotice {
    fn print_to_current_tab(&self, message: &str);
}

/// Directories the host exposes to plugins.
pub trait HostDirectories {
    fn app_path(&self) -> PathBuf;
    fn resources_path(&self) -> PathBuf;
    fn config_path(&self) -> PathBuf;
    fn plugin_path(&self, plugin_id: &str) -> PathBuf;
}

/// Everything the event handlers need from the host.
pub trait Host: ClientIdentity + StatusNotice {}

impl<T: ClientIdentity + StatusNotice> Host for T {}

/// Snapshot of the host directories taken at init.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPaths {
    pub app: PathBuf,
    pub resources: PathBuf,
    pub config: PathBuf,
    pub plugin: PathBuf,
}

impl HostPaths {
    pub fn query(dirs: &impl HostDirectories, plugin_id: &str) -> Self {
        Self {
            app: dirs.app_path(),
            resources: dirs.resources_path(),
            config: dirs.config_path(),
            plugin: dirs.plugin_path(plugin_id),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording host used by the unit tests.

    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct MockHost {
        pub nickname: RefCell<String>,
        pub notices: RefCell<Vec<String>>,
        pub writes: RefCell<Vec<String>>,
        pub flushes: RefCell<usize>,
        pub fail_nickname_read: bool,
        pub config_dir: PathBuf,
    }

    impl MockHost {
        pub fn named(nickname: &str) -> Self {
            Self {
                nickname: RefCell::new(nickname.to_string()),
                ..Self::default()
            }
        }

        pub fn nickname(&self) -> String {
            self.nickname.borrow().clone()
        }
    }

    impl ClientIdentity for MockHost {
        fn current_connection(&self) -> ConnectionId {
            1
        }

        fn own_client_id(&self, _connection: ConnectionId) -> Result<ClientId, HostError> {
            Ok(7)
        }

        fn self_nickname(&self, _connection: ConnectionId) -> Result<String, HostError> {
            if self.fail_nickname_read {
                return Err(HostError::Call {
                    function: "getClientSelfVariableAsString",
                    code: 0x0200,
                });
            }
            Ok(self.nickname())
        }

        fn set_self_nickname(
            &self,
            _connection: ConnectionId,
            nickname: &str,
        ) -> Result<(), HostError> {
            self.writes.borrow_mut().push(nickname.to_string());
            *self.nickname.borrow_mut() = nickname.to_string();
            Ok(())
        }

        fn flush_self_updates(&self, _connection: ConnectionId) -> Result<(), HostError> {
            *self.flushes.borrow_mut() += 1;
            Ok(())
        }
    }

    impl StatusNotice for MockHost {
        fn print_to_current_tab(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }
    }

    impl HostDirectories for MockHost {
        fn app_path(&self) -> PathBuf {
            PathBuf::from("/opt/ts3")
        }

        fn resources_path(&self) -> PathBuf {
            PathBuf::from("/opt/ts3/resources")
        }

        fn config_path(&self) -> PathBuf {
            self.config_dir.clone()
        }

        fn plugin_path(&self, plugin_id: &str) -> PathBuf {
            PathBuf::from("/opt/ts3/plugins").join(plugin_id)
        }
    }
}

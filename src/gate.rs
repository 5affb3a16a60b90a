//! Mute state shared between the UI callbacks and the audio callback.
//!
//! The flags are atomics so the audio thread can read the mute flag
//! without locking while menu and hotkey events flip it.

use crate::host::{Host, HostError};
use crate::nickname::{with_mute_suffix, without_mute_suffix, MUTE_SUFFIX};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MuteState {
    pub enabled: bool,
    pub rename_on_toggle: bool,
}

/// What happened to the nickname during a mute toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Name changing is switched off.
    Disabled,
    /// The name already matched the new mute state.
    Unchanged,
    /// The host was given this new name.
    Renamed(String),
}

pub struct MuteGate {
    enabled: AtomicBool,
    rename_on_toggle: AtomicBool,
    /// Set while the published nickname carries a suffix this gate added.
    tagged: AtomicBool,
    suffix: String,
    announce: bool,
}

impl Default for MuteGate {
    fn default() -> Self {
        Self::new(false, MUTE_SUFFIX, true)
    }
}

impl MuteGate {
    /// Starts unmuted.
    pub fn new(rename_on_toggle: bool, suffix: &str, announce: bool) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            rename_on_toggle: AtomicBool::new(rename_on_toggle),
            tagged: AtomicBool::new(false),
            suffix: suffix.to_string(),
            announce,
        }
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn renames_on_toggle(&self) -> bool {
        self.rename_on_toggle.load(Ordering::Relaxed)
    }

    pub fn state(&self) -> MuteState {
        MuteState {
            enabled: self.is_muted(),
            rename_on_toggle: self.renames_on_toggle(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Flips the mute flag, announces it and syncs the nickname. Returns the new flag.
    ///
    /// A failed rename is logged and does not undo the flip.
    pub fn toggle_mute(&self, host: &impl Host) -> bool {
        let muted = !self.enabled.fetch_xor(true, Ordering::Relaxed);
        info!("fake mute {}", if muted { "enabled" } else { "disabled" });

        if self.announce {
            let message = format!(
                "{} Fake Muter.",
                if muted { "Enabled" } else { "Disabled" }
            );
            host.print_to_current_tab(&message);
        }

        match self.sync_nickname(host, muted) {
            Ok(RenameOutcome::Renamed(name)) => debug!("nickname changed to {:?}", name),
            Ok(_) => {}
            Err(e) => warn!("could not update nickname: {}", e),
        }
        muted
    }

    /// Flips name changing. Takes effect on the next mute toggle.
    pub fn toggle_rename(&self) -> bool {
        let rename = !self.rename_on_toggle.fetch_xor(true, Ordering::Relaxed);
        info!(
            "name changing {}",
            if rename { "enabled" } else { "disabled" }
        );
        rename
    }

    /// Whether the published nickname carries a suffix added by this gate.
    pub fn is_tagged(&self) -> bool {
        self.tagged.load(Ordering::Relaxed)
    }

    /// Un-muting always removes a suffix this gate added, even if name
    /// changing was switched off in between.
    pub(crate) fn sync_nickname(
        &self,
        host: &impl Host,
        muted: bool,
    ) -> Result<RenameOutcome, HostError> {
        let cleanup = !muted && self.is_tagged();
        if !self.renames_on_toggle() && !cleanup {
            return Ok(RenameOutcome::Disabled);
        }

        let connection = host.current_connection();
        match host.own_client_id(connection) {
            Ok(client) => debug!("renaming client {} on connection {}", client, connection),
            Err(e) => debug!("own client id unavailable on {}: {}", connection, e),
        }

        let current = host.self_nickname(connection)?;
        let updated = if muted {
            with_mute_suffix(&current, &self.suffix)
        } else {
            without_mute_suffix(&current, &self.suffix).map(str::to_string)
        };

        let Some(updated) = updated else {
            debug!("nickname {:?} already matches mute state", current);
            if !muted {
                self.tagged.store(false, Ordering::Relaxed);
            }
            return Ok(RenameOutcome::Unchanged);
        };

        host.set_self_nickname(connection, &updated)?;
        self.tagged.store(muted, Ordering::Relaxed);
        host.flush_self_updates(connection)?;
        Ok(RenameOutcome::Renamed(updated))
    }
}

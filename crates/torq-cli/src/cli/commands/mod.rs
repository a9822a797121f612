//! CLI subcommand implementations.

mod add;
mod force;
mod label;
mod remove;
mod run;
mod status;
mod stop;

pub use add::run_add;
pub use force::run_force;
pub use label::{run_label, LabelAction};
pub use remove::run_remove;
pub use run::run_daemon;
pub use status::run_status;
pub use stop::run_stop;

use anyhow::Result;
use torq_core::api::{Command, Response};

use super::control_socket;

/// Hand a command to a running daemon. `Ok(true)` means a daemon handled
/// it (errors from the daemon become CLI errors); `Ok(false)` means no
/// daemon is listening and the caller should fall back to the store.
pub(super) async fn try_daemon(command: &Command) -> Result<bool> {
    let path = control_socket::socket_path()?;
    match control_socket::send_command(&path, command).await? {
        Some(Response { ok: true, .. }) => Ok(true),
        Some(Response { ok: false, error }) => {
            anyhow::bail!("{}", error.unwrap_or_else(|| "daemon rejected the command".into()))
        }
        None => Ok(false),
    }
}

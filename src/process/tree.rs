//! Best-effort termination of a child and everything it spawned
//!
//! On Unix a child spawned with [`spawn_in_new_process_group`] leads its own
//! process group, so the whole group can be killed at once. Elsewhere only
//! the direct child is killed.

use std::io;
use std::process::{Child, Command};

/// Spawn a command as the leader of a new process group when supported.
#[cfg(unix)]
pub fn spawn_in_new_process_group(cmd: &mut Command) -> io::Result<Child> {
    use std::os::unix::process::CommandExt;

    cmd.process_group(0);
    cmd.spawn()
}

/// Spawn a command normally; process groups are a Unix concept.
#[cfg(not(unix))]
pub fn spawn_in_new_process_group(cmd: &mut Command) -> io::Result<Child> {
    cmd.spawn()
}

/// Kill `child` and, when it leads its own process group, the whole group.
///
/// Errors are ignored: the process may already have exited.
#[cfg(unix)]
pub fn terminate_process_tree(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::{getpgid, Pid};

    if let Ok(raw) = i32::try_from(child.id()) {
        let pid = Pid::from_raw(raw);
        // Only signal the group if the child is its leader; otherwise we
        // would hit our own group.
        if matches!(getpgid(Some(pid)), Ok(pgid) if pgid == pid) {
            if let Err(e) = killpg(pid, Signal::SIGKILL) {
                tracing::debug!(pid = raw, error = %e, "killpg failed");
            }
        }
    }

    let _ = child.kill();
}

#[cfg(not(unix))]
pub fn terminate_process_tree(child: &mut Child) {
    let _ = child.kill();
}

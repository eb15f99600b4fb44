//! Process table.
//!
//! Records without context switching: there is no scheduler and nothing
//! ever runs "as" one of these entries. The table tracks what has been
//! registered (the shell is PID 1) and feeds the `sysinfo` report.

/// Maximum number of simultaneous process records.
pub const MAX_PROCESSES: usize = 16;

/// Maximum stored process-name length in bytes.
const NAME_MAX: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pid(pub u32);

#[derive(Debug, Clone, Copy)]
pub struct Process {
    pid: Pid,
    priority: u8,
    name: [u8; NAME_MAX],
    name_len: usize,
}

impl Process {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or("")
    }
}

pub struct ProcessTable {
    slots: [Option<Process>; MAX_PROCESSES],
    next_pid: u32,
}

impl ProcessTable {
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_PROCESSES],
            next_pid: 1,
        }
    }

    /// Register a process in the first free slot.
    pub fn spawn(&mut self, name: &str, priority: u8) -> Option<Pid> {
        let idx = self.slots.iter().position(|slot| slot.is_none())?;
        let pid = Pid(self.next_pid);
        self.next_pid += 1;

        let mut stored = [0u8; NAME_MAX];
        let n = name.len().min(NAME_MAX);
        stored[..n].copy_from_slice(&name.as_bytes()[..n]);
        self.slots[idx] = Some(Process {
            pid,
            priority,
            name: stored,
            name_len: n,
        });
        log::info!("process: spawned '{}' as pid {}", name, pid.0);
        Some(pid)
    }

    /// Remove a record by PID; unknown PIDs are ignored.
    pub fn kill(&mut self, pid: Pid) {
        for slot in self.slots.iter_mut() {
            if slot.map(|p| p.pid) == Some(pid) {
                *slot = None;
                return;
            }
        }
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.slots.iter().flatten()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Pinned FreeRTOS thread for the sampling loop.

use esp_idf_svc::hal::cpu::Core;
use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;

use crate::config::GamepadConfig;
use crate::error::SpawnError;
use crate::gamepad::TaskSpawner;

const TASK_NAME: &[u8] = b"input_task\0";

/// Spawns a `std::thread` with a fixed FreeRTOS priority and core.
#[derive(Debug, Clone, Copy)]
pub struct PinnedThread {
    pub stack_size: usize,
    pub priority: u8,
    pub core: Core,
}

impl PinnedThread {
    pub fn from_config(config: &GamepadConfig) -> Self {
        Self {
            stack_size: config.task_stack_size,
            priority: config.task_priority,
            core: if config.task_core == 0 {
                Core::Core0
            } else {
                Core::Core1
            },
        }
    }
}

impl TaskSpawner for PinnedThread {
    fn spawn<F>(self, task: F) -> Result<(), SpawnError>
    where
        F: FnOnce() + Send + 'static,
    {
        let config = ThreadSpawnConfiguration {
            name: Some(TASK_NAME),
            stack_size: self.stack_size,
            priority: self.priority,
            inherit: false,
            pin_to_core: Some(self.core),
            ..Default::default()
        };

        if let Err(err) = config.set() {
            log::error!("failed to configure sampling thread: {}", err);
            return Err(SpawnError);
        }

        let spawned = std::thread::Builder::new()
            .stack_size(self.stack_size)
            .spawn(task);

        // Later std::thread spawns should not inherit our pinning
        if let Err(err) = ThreadSpawnConfiguration::default().set() {
            log::warn!("failed to restore pthread defaults: {}", err);
        }

        match spawned {
            Ok(_detached) => {
                log::info!(
                    "sampling thread started: stack={} priority={} core={:?}",
                    self.stack_size,
                    self.priority,
                    self.core
                );
                Ok(())
            }
            Err(err) => {
                log::error!("failed to spawn sampling thread: {}", err);
                Err(SpawnError)
            }
        }
    }
}

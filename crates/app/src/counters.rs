use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use co2_core::CounterReading;
use sysinfo::Networks;

use crate::error::{AppError, Result};

/// Supplies cumulative sent/received byte counts for the host.
pub trait CounterSource: Send {
    fn read(&mut self) -> Result<CounterReading>;
}

/// Counters summed over every interface `sysinfo` reports.
pub struct SystemCounters {
    networks: Networks,
}

impl SystemCounters {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SystemCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for SystemCounters {
    fn read(&mut self) -> Result<CounterReading> {
        self.networks.refresh();
        let mut reading = CounterReading::default();
        let mut interfaces = 0usize;
        for (_interface_name, network) in &self.networks {
            reading.bytes_sent = reading.bytes_sent.saturating_add(network.total_transmitted());
            reading.bytes_received =
                reading.bytes_received.saturating_add(network.total_received());
            interfaces += 1;
        }
        if interfaces == 0 {
            return Err(AppError::CounterRead(
                "no network interfaces available".to_string(),
            ));
        }
        Ok(reading)
    }
}

/// Replays queued readings; a queued `None` or an empty queue is a failed read.
#[derive(Clone, Debug, Default)]
pub struct ScriptedCounters {
    readings: Arc<Mutex<VecDeque<Option<CounterReading>>>>,
}

impl ScriptedCounters {
    pub fn new<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = CounterReading>,
    {
        Self {
            readings: Arc::new(Mutex::new(readings.into_iter().map(Some).collect())),
        }
    }

    pub fn push(&self, reading: CounterReading) {
        self.queue().push_back(Some(reading));
    }

    pub fn push_failure(&self) {
        self.queue().push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.queue().len()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Option<CounterReading>>> {
        self.readings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CounterSource for ScriptedCounters {
    fn read(&mut self) -> Result<CounterReading> {
        match self.queue().pop_front() {
            Some(Some(reading)) => Ok(reading),
            Some(None) => Err(AppError::CounterRead("scripted failure".to_string())),
            None => Err(AppError::CounterRead("no scripted reading left".to_string())),
        }
    }
}

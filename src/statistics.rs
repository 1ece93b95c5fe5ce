use std::{
    sync::{Arc, Mutex, RwLock},
    thread,
    time::Duration,
};

use log::{error, info};

use crate::{constants::STATISTICS_WAIT_IN_MS, errors::MachineError, inventory::Inventory};

/// Contadores de pedidos terminados
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub processed: u64,
    pub rejected: u64,
}

pub struct StatisticsPrinter {
    statistics: Arc<RwLock<Statistics>>,
    inventory: Arc<Mutex<Inventory>>,
    finish: Mutex<bool>,
}

impl StatisticsPrinter {
    pub fn new(
        statistics: Arc<RwLock<Statistics>>,
        inventory: Arc<Mutex<Inventory>>,
    ) -> StatisticsPrinter {
        StatisticsPrinter {
            statistics,
            inventory,
            finish: Mutex::new(false),
        }
    }

    pub fn finish(&self) {
        if let Ok(mut finish) = self.finish.lock() {
            *finish = true;
            return;
        }
        error!("Error setting statistics thread to finish");
    }

    /// Imprime las estadisticas cada `STATISTICS_WAIT_IN_MS` hasta que se llame a `finish`
    pub fn process_statistics(&self) -> Result<(), MachineError> {
        loop {
            if *self.finish.lock()? {
                self.print_statistics()?;
                return Ok(());
            }

            self.print_statistics()?;

            thread::sleep(Duration::from_millis(STATISTICS_WAIT_IN_MS));
        }
    }

    fn print_statistics(&self) -> Result<(), MachineError> {
        info!("{}", self.statistics_line()?);
        Ok(())
    }

    pub fn statistics_line(&self) -> Result<String, MachineError> {
        let statistics = *self.statistics.read()?;
        let mut line = format!(
            "[STATISTICS] Orders processed={} rejected={} | Ingredient=(remaining, consumed) |",
            statistics.processed, statistics.rejected
        );
        self.add_resources_to_statistics_string(&mut line)?;
        Ok(line)
    }

    fn add_resources_to_statistics_string(&self, line: &mut String) -> Result<(), MachineError> {
        let inventory = self.inventory.lock()?;
        let mut containers: Vec<_> = inventory.containers().collect();
        containers.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (ingredient, container) in containers {
            line.push_str(&format!(
                " {}=({},{}) ",
                ingredient, container.remaining, container.consumed
            ));
        }
        Ok(())
    }
}

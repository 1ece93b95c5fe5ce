use std::{env, error::Error, sync::Arc, thread};

use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;

use vending_machine::{
    constants::DEFAULT_MACHINE_FILE, machine_reader::read_machine_from_file, VendingMachine,
};

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_MACHINE_FILE.to_string());
    let setup = read_machine_from_file(&path)?;
    let machine = VendingMachine::with_config(setup.config, setup.inventory, setup.beverages);

    let printer = Arc::new(machine.statistics_printer());
    let printer_clone = printer.clone();
    let statistics = thread::spawn(move || {
        if let Err(err) = printer_clone.process_statistics() {
            error!("[STATISTICS] Stopped: {}", err);
        }
    });

    for order in &setup.orders {
        if let Err(err) = machine.prepare(order.outlet, &order.beverage) {
            info!(
                "[MACHINE] Order of {} in outlet {} not taken: {}",
                order.beverage, order.outlet, err
            );
        }
    }

    machine.shutdown()?;
    printer.finish();
    statistics
        .join()
        .map_err(|_| "the statistics thread panicked")?;

    for ingredient in machine.low_ingredients()? {
        warn!("[MACHINE] {} is running low", ingredient);
    }
    Ok(())
}

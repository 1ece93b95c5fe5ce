//! Salidas de la maquina. Cada una prepara de a un pedido por vez.
use std::sync::{Mutex, PoisonError};

use log::error;

use crate::errors::{MachineError, PreparationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletStatus {
    Available,
    Busy,
}

/// Registro de las salidas, numeradas de 1 a N. Cada salida tiene su propio lock.
pub struct OutletRegistry {
    outlets: Vec<Mutex<OutletStatus>>,
}

impl OutletRegistry {
    pub fn new(count: usize) -> OutletRegistry {
        OutletRegistry {
            outlets: (0..count)
                .map(|_| Mutex::new(OutletStatus::Available))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }

    fn outlet(&self, id: usize) -> Result<&Mutex<OutletStatus>, PreparationError> {
        id.checked_sub(1)
            .and_then(|index| self.outlets.get(index))
            .ok_or(PreparationError::UnknownOutlet(id))
    }

    /// Marca la salida como ocupada. Si ya estaba ocupada se rechaza, no se encola.
    /// La salida vuelve a estar disponible cuando se suelta el guard devuelto.
    pub fn try_acquire(&self, id: usize) -> Result<OutletGuard<'_>, MachineError> {
        let mut status = self.outlet(id)?.lock()?;
        if *status == OutletStatus::Busy {
            return Err(PreparationError::OutletBusy(id).into());
        }
        *status = OutletStatus::Busy;
        Ok(OutletGuard { registry: self, id })
    }

    /// Vuelve a dejar disponible la salida, aunque su lock este envenenado
    pub fn release(&self, id: usize) {
        match self.outlet(id) {
            Ok(outlet) => {
                let mut status = outlet.lock().unwrap_or_else(PoisonError::into_inner);
                *status = OutletStatus::Available;
            }
            Err(err) => error!("[OUTLET] Error releasing outlet: {}", err),
        }
    }

    pub fn status(&self, id: usize) -> Result<OutletStatus, MachineError> {
        let status = self.outlet(id)?.lock()?;
        Ok(*status)
    }
}

/// Mientras exista, la salida esta ocupada
pub struct OutletGuard<'a> {
    registry: &'a OutletRegistry,
    id: usize,
}

impl OutletGuard<'_> {
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Drop for OutletGuard<'_> {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_all_outlets_available() {
        let registry = OutletRegistry::new(3);
        assert_eq!(3, registry.len());
        for id in 1..=3 {
            assert_eq!(Ok(OutletStatus::Available), registry.status(id));
        }
    }

    #[test]
    fn should_take_an_outlet_and_release_it_when_done() {
        let registry = OutletRegistry::new(2);
        {
            let guard = registry.try_acquire(2).expect("Outlet 2 is free");
            assert_eq!(2, guard.id());
            assert_eq!(Ok(OutletStatus::Busy), registry.status(2));
            assert_eq!(Ok(OutletStatus::Available), registry.status(1));
        }
        assert_eq!(Ok(OutletStatus::Available), registry.status(2));
    }

    #[test]
    fn should_reject_a_busy_outlet() {
        let registry = OutletRegistry::new(1);
        let _guard = registry.try_acquire(1).expect("Outlet 1 is free");

        let result = registry.try_acquire(1);

        assert!(matches!(
            result,
            Err(MachineError::Rejected(PreparationError::OutletBusy(1)))
        ));
        assert_eq!(Ok(OutletStatus::Busy), registry.status(1));
    }

    #[test]
    fn should_reject_unknown_outlets() {
        let registry = OutletRegistry::new(3);

        for id in [0, 4] {
            assert!(matches!(
                registry.try_acquire(id),
                Err(MachineError::Rejected(PreparationError::UnknownOutlet(unknown))) if unknown == id
            ));
        }
        for id in 1..=3 {
            assert_eq!(Ok(OutletStatus::Available), registry.status(id));
        }
    }
}

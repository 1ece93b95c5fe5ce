use log::warn;

/// Contenedor de un ingrediente dentro del inventario.
/// Lleva lo que queda y lo que se consumio desde que se creo la maquina.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub remaining: u64,
    pub consumed: u64,
}

impl Container {
    pub fn new(initial_quantity: u64) -> Container {
        Container {
            remaining: initial_quantity,
            consumed: 0,
        }
    }

    pub fn has_enough(&self, quantity_required: u64) -> bool {
        quantity_required <= self.remaining
    }

    /// Saca del contenedor. Se tiene que haber chequeado antes con `has_enough`.
    pub fn consume(&mut self, quantity: u64) {
        self.remaining -= quantity;
        self.consumed += quantity;
    }

    /// Agrega al contenedor. Si la suma no entra en un `u64` queda en el maximo.
    pub fn refill(&mut self, quantity: u64) {
        self.remaining = match self.remaining.checked_add(quantity) {
            Some(remaining) => remaining,
            None => {
                warn!(
                    "[CONTAINER] Refill of {} over {} overflows, capped at {}",
                    quantity,
                    self.remaining,
                    u64::MAX
                );
                u64::MAX
            }
        };
    }
}

//! Seguimiento de los ingredientes que se estan acabando.
use std::collections::BTreeSet;

use crate::beverage::Ingredient;

/// Conjunto de ingredientes cuya cantidad esta por debajo de un porcentaje de su capacidad.
/// Por ejemplo, con capacidad 1000 y 20%, el limite es 200: con 199 se esta acabando, con 200 no.
#[derive(Debug, Clone)]
pub struct ThresholdTracker {
    percentage: u64,
    running_low: BTreeSet<Ingredient>,
}

impl ThresholdTracker {
    pub fn new(percentage: u64) -> ThresholdTracker {
        ThresholdTracker {
            percentage,
            running_low: BTreeSet::new(),
        }
    }

    pub fn percentage(&self) -> u64 {
        self.percentage
    }

    /// quantity < percentage / 100 * capacity, sin pasar por punto flotante
    pub fn is_below_threshold(&self, ingredient: &Ingredient, quantity: u64) -> bool {
        (quantity as u128) * 100 < (self.percentage as u128) * (ingredient.capacity() as u128)
    }

    /// Actualiza la pertenencia del ingrediente segun su nueva cantidad.
    /// Devuelve true si el ingrediente paso a estar por debajo del limite.
    pub fn on_quantity_changed(&mut self, ingredient: &Ingredient, new_quantity: u64) -> bool {
        if self.is_below_threshold(ingredient, new_quantity) {
            self.running_low.insert(ingredient.clone())
        } else {
            self.running_low.remove(ingredient);
            false
        }
    }

    /// Cambia el porcentaje y recalcula el conjunto con las cantidades actuales
    pub fn set_percentage<'a, I>(&mut self, percentage: u64, quantities: I)
    where
        I: IntoIterator<Item = (&'a Ingredient, u64)>,
    {
        self.percentage = percentage;
        self.running_low.clear();
        for (ingredient, quantity) in quantities {
            self.on_quantity_changed(ingredient, quantity);
        }
    }

    pub fn current_low_set(&self) -> &BTreeSet<Ingredient> {
        &self.running_low
    }
}

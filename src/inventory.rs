//! Inventario compartido por todas las salidas de la maquina.
//! No es thread safe por si mismo: la maquina lo protege entero con un unico `Mutex`,
//! asi chequear y descontar una receta completa es una sola operacion.
use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::{
    beverage::{Ingredient, Recipe},
    container::Container,
    errors::PreparationError,
    threshold::ThresholdTracker,
};

pub struct Inventory {
    containers: HashMap<Ingredient, Container>,
    threshold: ThresholdTracker,
}

impl Inventory {
    pub fn new(initial: HashMap<Ingredient, u64>, threshold_percentage: u64) -> Inventory {
        let mut threshold = ThresholdTracker::new(threshold_percentage);
        let containers = initial
            .into_iter()
            .map(|(ingredient, quantity)| {
                threshold.on_quantity_changed(&ingredient, quantity);
                (ingredient, Container::new(quantity))
            })
            .collect();
        Inventory {
            containers,
            threshold,
        }
    }

    pub fn get(&self, ingredient: &Ingredient) -> Option<u64> {
        self.containers
            .get(ingredient)
            .map(|container| container.remaining)
    }

    /// Verifica que alcance para toda la receta sin modificar nada
    pub fn check(&self, recipe: &Recipe) -> Result<(), PreparationError> {
        for (ingredient, quantity_required) in recipe {
            let container = self.containers.get(ingredient).ok_or_else(|| {
                PreparationError::IngredientUnavailable(ingredient.name().to_string())
            })?;
            if !container.has_enough(*quantity_required) {
                return Err(PreparationError::IngredientInsufficient(
                    ingredient.name().to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Descuenta la receta completa o nada. Devuelve los ingredientes que
    /// pasaron a estar por debajo del limite con este descuento.
    pub fn deduct(&mut self, recipe: &Recipe) -> Result<Vec<Ingredient>, PreparationError> {
        self.check(recipe)?;

        let mut crossed = Vec::new();
        for (ingredient, quantity_required) in recipe {
            if let Some(container) = self.containers.get_mut(ingredient) {
                container.consume(*quantity_required);
                debug!(
                    "[INVENTORY] Uses {} of {}, remains {}",
                    quantity_required, ingredient, container.remaining
                );
                if self
                    .threshold
                    .on_quantity_changed(ingredient, container.remaining)
                {
                    crossed.push(ingredient.clone());
                }
            }
        }
        Ok(crossed)
    }

    /// Agrega al ingrediente, creandolo si no existia. Devuelve la nueva cantidad.
    pub fn restock(&mut self, ingredient: &Ingredient, quantity: u64) -> u64 {
        let container = self
            .containers
            .entry(ingredient.clone())
            .and_modify(|container| container.refill(quantity))
            .or_insert_with(|| Container::new(quantity));
        let remaining = container.remaining;
        self.threshold.on_quantity_changed(ingredient, remaining);
        debug!("[INVENTORY] Restocked {} with {}, remains {}", ingredient, quantity, remaining);
        remaining
    }

    pub fn set_threshold_percentage(&mut self, percentage: u64) {
        let quantities = self
            .containers
            .iter()
            .map(|(ingredient, container)| (ingredient, container.remaining));
        self.threshold.set_percentage(percentage, quantities);
    }

    pub fn threshold_percentage(&self) -> u64 {
        self.threshold.percentage()
    }

    pub fn snapshot(&self) -> HashMap<Ingredient, u64> {
        self.containers
            .iter()
            .map(|(ingredient, container)| (ingredient.clone(), container.remaining))
            .collect()
    }

    pub fn low_ingredients(&self) -> BTreeSet<Ingredient> {
        self.threshold.current_low_set().clone()
    }

    pub fn containers(&self) -> impl Iterator<Item = (&Ingredient, &Container)> {
        self.containers.iter()
    }
}

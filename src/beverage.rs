//! Ingredientes y bebidas. Son datos inmutables que se cargan una sola vez.
use std::{collections::BTreeMap, fmt};

/// Ingrediente de la maquina. Se identifica por su nombre y su capacidad maxima,
/// la capacidad se usa para saber cuando se esta acabando.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ingredient {
    name: String,
    capacity: u64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, capacity: u64) -> Ingredient {
        Ingredient {
            name: name.into(),
            capacity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Receta de una bebida: cuanto se necesita de cada ingrediente
pub type Recipe = BTreeMap<Ingredient, u64>;

/// Bebida que sabe preparar la maquina. El nombre es unico dentro del catalogo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beverage {
    name: String,
    recipe: Recipe,
}

impl Beverage {
    /// Crea la bebida. Los ingredientes con cantidad 0 no forman parte de la receta.
    pub fn new(name: impl Into<String>, ingredients: Vec<(Ingredient, u64)>) -> Beverage {
        let mut recipe = Recipe::new();
        for (ingredient, quantity) in ingredients {
            if 0 < quantity {
                *recipe.entry(ingredient).or_insert(0) += quantity;
            }
        }
        Beverage {
            name: name.into(),
            recipe,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Cantidad total de ingredientes que lleva la bebida
    pub fn total_quantity(&self) -> u64 {
        self.recipe.values().sum()
    }
}

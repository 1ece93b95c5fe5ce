use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::beverage::{Beverage, Ingredient};
use crate::config::MachineConfig;
use crate::errors::ReaderError;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct JsonIngredient {
    name: String,
    capacity: u64,
    /// Si no esta, el ingrediente se conoce pero no hay en el inventario
    quantity: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JsonOrder {
    pub outlet: usize,
    pub beverage: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonMachine {
    #[serde(default)]
    config: MachineConfig,
    ingredients: Vec<JsonIngredient>,
    beverages: BTreeMap<String, BTreeMap<String, u64>>,
    #[serde(default)]
    orders: Vec<JsonOrder>,
}

/// Todo lo necesario para armar la maquina y los pedidos que se le van a hacer
#[derive(Debug)]
pub struct MachineSetup {
    pub config: MachineConfig,
    pub inventory: HashMap<Ingredient, u64>,
    pub beverages: Vec<Beverage>,
    pub orders: Vec<JsonOrder>,
}

pub fn read_machine_from_file<P: AsRef<Path>>(path: P) -> Result<MachineSetup, ReaderError> {
    let file = File::open(path)?;
    read_machine(BufReader::new(file))
}

pub fn read_machine<R: Read>(reader: R) -> Result<MachineSetup, ReaderError> {
    let machine: JsonMachine = serde_json::from_reader(reader)?;
    build_setup(machine)
}

fn build_setup(machine: JsonMachine) -> Result<MachineSetup, ReaderError> {
    let mut ingredients = HashMap::new();
    let mut inventory = HashMap::new();
    for json_ingredient in machine.ingredients {
        let ingredient = Ingredient::new(json_ingredient.name.clone(), json_ingredient.capacity);
        if let Some(quantity) = json_ingredient.quantity {
            if quantity > ingredient.capacity() {
                warn!(
                    "[READER] {} starts with {}, above its capacity {}",
                    ingredient,
                    quantity,
                    ingredient.capacity()
                );
            }
            inventory.insert(ingredient.clone(), quantity);
        }
        if ingredients
            .insert(json_ingredient.name.clone(), ingredient)
            .is_some()
        {
            return Err(ReaderError::InvalidSetup(format!(
                "ingredient {} is declared twice",
                json_ingredient.name
            )));
        }
    }

    let beverages = machine
        .beverages
        .into_iter()
        .map(|(name, recipe)| {
            let recipe = recipe
                .into_iter()
                .map(|(ingredient_name, quantity)| {
                    let ingredient = ingredients.get(&ingredient_name).cloned().unwrap_or_else(|| {
                        debug!("[READER] {} uses undeclared ingredient {}", name, ingredient_name);
                        Ingredient::new(ingredient_name, 0)
                    });
                    (ingredient, quantity)
                })
                .collect();
            Beverage::new(name, recipe)
        })
        .collect::<Vec<_>>();

    info!(
        "[READER] Read {} ingredients, {} beverages and {} orders",
        ingredients.len(),
        beverages.len(),
        machine.orders.len()
    );
    Ok(MachineSetup {
        config: machine.config,
        inventory,
        beverages,
        orders: machine.orders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MACHINE: &str = r#"{
        "config": { "outlets": 2, "threshold_percentage": 15 },
        "ingredients": [
            { "name": "hot_water", "capacity": 1000, "quantity": 500 },
            { "name": "sugar_syrup", "capacity": 200, "quantity": 100 },
            { "name": "green_mixture", "capacity": 200 }
        ],
        "beverages": {
            "green_tea": { "hot_water": 100, "sugar_syrup": 50, "green_mixture": 30 },
            "lemon_tea": { "hot_water": 100, "lemon_syrup": 10, "sugar_syrup": 0 }
        },
        "orders": [ { "outlet": 1, "beverage": "green_tea" } ]
    }"#;

    #[test]
    fn should_read_the_machine_setup() {
        let setup = read_machine(MACHINE.as_bytes()).expect("Valid machine");

        assert_eq!(2, setup.config.outlets);
        assert_eq!(15, setup.config.threshold_percentage);
        assert_eq!(2, setup.inventory.len());
        assert_eq!(
            Some(&500),
            setup.inventory.get(&Ingredient::new("hot_water", 1000))
        );
        assert_eq!(
            vec![JsonOrder {
                outlet: 1,
                beverage: "green_tea".to_string()
            }],
            setup.orders
        );
    }

    #[test]
    fn should_keep_declared_ingredients_out_of_the_inventory_without_quantity() {
        let setup = read_machine(MACHINE.as_bytes()).expect("Valid machine");

        let mixture = Ingredient::new("green_mixture", 200);
        let green_tea = setup
            .beverages
            .iter()
            .find(|beverage| beverage.name() == "green_tea")
            .expect("Green tea was read");
        assert_eq!(Some(&30), green_tea.recipe().get(&mixture));
        assert_eq!(None, setup.inventory.get(&mixture));
    }

    #[test]
    fn should_build_recipes_with_undeclared_ingredients() {
        let setup = read_machine(MACHINE.as_bytes()).expect("Valid machine");

        let lemon_tea = setup
            .beverages
            .iter()
            .find(|beverage| beverage.name() == "lemon_tea")
            .expect("Lemon tea was read");
        assert_eq!(2, lemon_tea.recipe().len());
        assert_eq!(
            Some(&10),
            lemon_tea.recipe().get(&Ingredient::new("lemon_syrup", 0))
        );
    }

    #[test]
    fn should_use_the_default_config_if_missing() {
        let setup = read_machine(r#"{ "ingredients": [], "beverages": {} }"#.as_bytes())
            .expect("Valid machine");
        assert_eq!(MachineConfig::default(), setup.config);
        assert!(setup.orders.is_empty());
    }

    #[test]
    fn should_fail_with_a_repeated_ingredient() {
        let result = read_machine(
            r#"{
                "ingredients": [
                    { "name": "hot_water", "capacity": 1000 },
                    { "name": "hot_water", "capacity": 500 }
                ],
                "beverages": {}
            }"#
            .as_bytes(),
        );
        assert!(matches!(result, Err(ReaderError::InvalidSetup(_))));
    }

    #[test]
    fn should_fail_with_invalid_json() {
        let result = read_machine("{ not json".as_bytes());
        assert!(matches!(result, Err(ReaderError::ParseError(_))));
    }

    #[test]
    fn should_fail_with_a_missing_file() {
        let result = read_machine_from_file("this/file/does/not/exist.json");
        assert!(matches!(result, Err(ReaderError::FileReaderError(_))));
    }
}

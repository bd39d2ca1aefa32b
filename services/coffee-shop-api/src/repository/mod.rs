//! Drink stores

use plinth::repository::UpdateRepository;

use crate::models::{Drink, DrinkPatch, NewDrink};

mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::InMemoryDrinks;
#[cfg(feature = "database")]
pub use postgres::PgDrinkRepository;

/// Drink store
///
/// Titles are unique: creating or renaming to a taken title fails with
/// `AlreadyExists`.
pub trait DrinkRepository: UpdateRepository<i64, Drink, NewDrink, DrinkPatch> {}

impl<T> DrinkRepository for T where T: UpdateRepository<i64, Drink, NewDrink, DrinkPatch> {}

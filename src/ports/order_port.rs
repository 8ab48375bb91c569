//! Order persistence port trait.

use crate::domain::error::DeskError;
use crate::domain::order::{NewOrder, Order};

pub trait OrderPort {
    /// Stores a validated order and returns it with its id and timestamp.
    fn create_order(&self, order: &NewOrder) -> Result<Order, DeskError>;

    /// All orders, newest first.
    fn list_orders(&self) -> Result<Vec<Order>, DeskError>;
}

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::CartError;

/// Query string scoping the menu, reservation and accommodation pages
/// to one restaurant. Absent means the page is unscoped.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct RestaurantScope {
    #[serde(default)]
    pub restaurant: Option<Uuid>,
}

impl RestaurantScope {
    /// Whether a cart may be shown on a page with this scope. An
    /// unscoped page admits any cart; a scoped page admits an empty
    /// cart or one pinned to the same restaurant.
    pub fn admits(&self, cart: &Cart) -> bool {
        match (self.restaurant, cart.restaurant_id()) {
            (Some(scoped), Some(pinned)) => scoped == pinned,
            _ => true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub restaurant_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// Client-local cart. Serializable so the browser can stash it between
/// visits. The first item added pins the cart to its restaurant; items
/// from any other restaurant are rejected until the cart empties.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    restaurant_id: Option<Uuid>,
}

impl Cart {
    pub fn add(&mut self, item: &MenuItem) -> Result<(), CartError> {
        match self.restaurant_id {
            Some(pinned) if pinned != item.restaurant_id => {
                return Err(CartError::MixedRestaurants);
            }
            None => self.restaurant_id = Some(item.restaurant_id),
            _ => {}
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id: item.id,
                name: item.name.clone(),
                unit_price: item.price.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Quantity zero removes the line. An empty cart loses its
    /// restaurant affiliation so a new one can be pinned.
    pub fn set_quantity(&mut self, item_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.lines.retain(|line| line.item_id != item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = quantity;
        }
        if self.lines.is_empty() {
            self.restaurant_id = None;
        }
    }

    pub fn total(&self) -> BigDecimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(BigDecimal::from(0), |acc, line_total| acc + line_total)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.restaurant_id = None;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn restaurant_id(&self) -> Option<Uuid> {
        self.restaurant_id
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

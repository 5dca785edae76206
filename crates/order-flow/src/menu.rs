//! Menu catalog: ordered categories of priced items.
//!
//! Pure, read-only lookup. The catalog is loaded once at startup (from
//! config, or the built-in default) and never mutated; iteration order is
//! presentation order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub key: String,
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    categories: Vec<MenuCategory>,
}

impl Menu {
    pub fn new(categories: Vec<MenuCategory>) -> Self {
        Self { categories }
    }

    /// All categories, in presentation order.
    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&MenuCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Display name for a category; falls back to the key itself.
    pub fn category_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.category(key).map(|c| c.name.as_str()).unwrap_or(key)
    }

    /// Items of a category. Unknown keys yield an empty slice.
    pub fn items(&self, category_key: &str) -> &[MenuItem] {
        self.category(category_key)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn item(&self, category_key: &str, item_key: &str) -> Option<&MenuItem> {
        self.items(category_key).iter().find(|i| i.key == item_key)
    }
}

impl Default for Menu {
    /// The built-in coffee shop catalog.
    fn default() -> Self {
        Self::new(vec![
            category(
                "coffee",
                "☕ Coffee",
                &[
                    ("espresso", "Espresso", 2.50),
                    ("americano", "Americano", 3.00),
                    ("cappuccino", "Cappuccino", 3.50),
                    ("latte", "Latte", 3.50),
                    ("flat_white", "Flat White", 3.50),
                    ("macchiato", "Macchiato", 3.00),
                    ("mocha", "Mocha", 4.00),
                    ("cold_brew", "Cold Brew", 4.50),
                ],
            ),
            category(
                "desserts",
                "🍰 Desserts",
                &[
                    ("tiramisu", "Tiramisu", 5.50),
                    ("cheesecake", "Cheesecake", 4.50),
                    ("brownie", "Chocolate Brownie", 3.50),
                    ("croissant", "Croissant", 3.00),
                    ("muffin", "Muffin", 3.50),
                    ("cookie", "Chocolate Cookie", 2.50),
                    ("apple_pie", "Apple Pie", 4.00),
                    ("donut", "Donut", 3.00),
                ],
            ),
            category(
                "food",
                "🥪 Food",
                &[
                    ("sandwich", "Club Sandwich", 6.50),
                    ("panini", "Grilled Panini", 5.50),
                    ("salad", "Caesar Salad", 7.00),
                    ("wrap", "Chicken Wrap", 6.00),
                    ("quiche", "Quiche Lorraine", 5.00),
                    ("bagel", "Bagel with Cream Cheese", 4.50),
                    ("soup", "Soup of the Day", 4.00),
                    ("avocado_toast", "Avocado Toast", 6.50),
                ],
            ),
            category(
                "drinks",
                "🥤 Drinks",
                &[
                    ("water", "Mineral Water", 1.50),
                    ("soda", "Soft Drink", 2.50),
                    ("juice", "Fresh Juice", 4.00),
                    ("tea", "Herbal Tea", 2.50),
                    ("smoothie", "Fruit Smoothie", 5.00),
                    ("lemonade", "Fresh Lemonade", 3.50),
                    ("iced_tea", "Iced Tea", 3.00),
                    ("milkshake", "Milkshake", 4.50),
                ],
            ),
        ])
    }
}

fn category(key: &str, name: &str, items: &[(&str, &str, f64)]) -> MenuCategory {
    MenuCategory {
        key: key.to_string(),
        name: name.to_string(),
        items: items
            .iter()
            .map(|(key, name, price)| MenuItem {
                key: key.to_string(),
                name: name.to_string(),
                price: *price,
            })
            .collect(),
    }
}

/// Currency presentation helper: two decimal digits, dollar sign.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_four_ordered_categories() {
        let menu = Menu::default();
        let keys: Vec<&str> = menu.categories().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["coffee", "desserts", "food", "drinks"]);
        assert_eq!(menu.items("coffee").len(), 8);
    }

    #[test]
    fn item_lookup_finds_known_keys() {
        let menu = Menu::default();
        let espresso = menu.item("coffee", "espresso").unwrap();
        assert_eq!(espresso.name, "Espresso");
        assert_eq!(espresso.price, 2.50);
    }

    #[test]
    fn unknown_category_yields_empty_items() {
        let menu = Menu::default();
        assert!(menu.items("sushi").is_empty());
        assert!(menu.item("sushi", "espresso").is_none());
        assert!(menu.item("coffee", "sushi").is_none());
        assert_eq!(menu.category_name("sushi"), "sushi");
    }

    #[test]
    fn prices_format_with_two_decimals() {
        assert_eq!(format_price(2.5), "$2.50");
        assert_eq!(format_price(5.0), "$5.00");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn menu_round_trips_through_serde() {
        let menu = Menu::default();
        let json = serde_json::to_string(&menu).unwrap();
        let back: Menu = serde_json::from_str(&json).unwrap();
        assert_eq!(back, menu);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: u32,
    pub product_name: String,
    pub supplier_id: Option<u32>,
    pub category_id: Option<u32>,
    pub category_name: Option<String>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<f64>,
    pub units_in_stock: Option<u32>,
    pub units_on_order: Option<u32>,
    pub reorder_level: Option<u32>,
    pub discontinued: bool,
}

// (id, name, supplier, category, quantity, price, stock, on order, reorder, discontinued)
type Row = (u32, &'static str, u32, u32, &'static str, f64, u32, u32, u32, bool);

const CATALOG: &[Row] = &[
    (1, "Chai", 1, 1, "10 boxes x 20 bags", 18.0, 39, 0, 10, false),
    (2, "Chang", 1, 1, "24 - 12 oz bottles", 19.0, 17, 40, 25, false),
    (3, "Aniseed Syrup", 1, 2, "12 - 550 ml bottles", 10.0, 13, 70, 25, false),
    (4, "Chef Anton's Cajun Seasoning", 2, 2, "48 - 6 oz jars", 22.0, 53, 0, 0, false),
    (5, "Chef Anton's Gumbo Mix", 2, 2, "36 boxes", 21.35, 0, 0, 0, true),
    (6, "Grandma's Boysenberry Spread", 3, 2, "12 - 8 oz jars", 25.0, 120, 0, 25, false),
    (7, "Uncle Bob's Organic Dried Pears", 3, 7, "12 - 1 lb pkgs.", 30.0, 15, 0, 10, false),
    (8, "Northwoods Cranberry Sauce", 3, 2, "12 - 12 oz jars", 40.0, 6, 0, 0, false),
    (9, "Mishi Kobe Niku", 4, 6, "18 - 500 g pkgs.", 97.0, 29, 0, 0, true),
    (10, "Ikura", 4, 8, "12 - 200 ml jars", 31.0, 31, 0, 0, false),
    (11, "Queso Cabrales", 5, 4, "1 kg pkg.", 21.0, 22, 30, 30, false),
    (12, "Queso Manchego La Pastora", 5, 4, "10 - 500 g pkgs.", 38.0, 86, 0, 0, false),
    (13, "Konbu", 6, 8, "2 kg box", 6.0, 24, 0, 5, false),
    (14, "Tofu", 6, 7, "40 - 100 g pkgs.", 23.25, 35, 0, 0, false),
    (15, "Genen Shouyu", 6, 2, "24 - 250 ml bottles", 15.5, 39, 0, 5, false),
    (16, "Pavlova", 7, 3, "32 - 500 g boxes", 17.45, 29, 0, 10, false),
    (17, "Alice Mutton", 7, 6, "20 - 1 kg tins", 39.0, 0, 0, 0, true),
    (18, "Carnarvon Tigers", 7, 8, "16 kg pkg.", 62.5, 42, 0, 0, false),
    (19, "Teatime Chocolate Biscuits", 8, 3, "10 boxes x 12 pieces", 9.2, 25, 0, 5, false),
    (20, "Sir Rodney's Marmalade", 8, 3, "30 gift boxes", 81.0, 40, 0, 0, false),
];

fn category_name(category_id: u32) -> Option<&'static str> {
    match category_id {
        1 => Some("Beverages"),
        2 => Some("Condiments"),
        3 => Some("Confections"),
        4 => Some("Dairy Products"),
        5 => Some("Grains/Cereals"),
        6 => Some("Meat/Poultry"),
        7 => Some("Produce"),
        8 => Some("Seafood"),
        _ => None,
    }
}

/// Built-in demo catalog.
pub fn seed_catalog() -> Vec<Product> {
    CATALOG
        .iter()
        .map(
            |&(id, name, supplier, category, quantity, price, stock, on_order, reorder, discontinued)| Product {
                product_id: id,
                product_name: name.to_string(),
                supplier_id: Some(supplier),
                category_id: Some(category),
                category_name: category_name(category).map(str::to_string),
                quantity_per_unit: Some(quantity.to_string()),
                unit_price: Some(price),
                units_in_stock: Some(stock),
                units_on_order: Some(on_order),
                reorder_level: Some(reorder),
                discontinued,
            },
        )
        .collect()
}

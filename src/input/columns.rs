use crate::model::table::Table;

pub const REQUIRED_COLUMNS: [&str; 21] = [
    "Product Name",
    "Brand Name",
    "Price",
    "Quantity/Size",
    "Shade/Color",
    "Ingredients",
    "Product Type",
    "Usage Instructions",
    "Expiration Date",
    "Manufacturing Date",
    "Country of Origin",
    "Special Features",
    "Certifications",
    "Description",
    "Image Path",
    "Benefits",
    "Skin Type Compatibility",
    "Packaging",
    "Product Images",
    "Return Policy",
    "Disclaimer",
];

pub fn missing_columns(table: &Table) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect()
}

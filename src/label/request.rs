//! Label requests parsed from the JSON payload argument.
//!
//! | Kind | Payload |
//! |------|---------|
//! | drink | `{"customer_name", "date_time", "drink_name", "modifiers": []}` |
//! | pantry | `{"description", "date"}` |
//! | shopping | `{"categories": [{"name", "items": []}]}` or `{"receipt_items": [{"category", "ingredients": []}]}` |
//!
//! Names and descriptions are required and must not be blank. Everything
//! else has a default.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use crate::error::{LabelError, LabelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Drink,
    Pantry,
    Shopping,
}

impl LabelKind {
    /// Script name printers list under `scripts`.
    pub fn role(self) -> &'static str {
        match self {
            LabelKind::Drink => "drinks",
            LabelKind::Pantry => "pantry",
            LabelKind::Shopping => "shopping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrinkOrder {
    pub customer_name: String,
    #[serde(default)]
    pub date_time: String,
    pub drink_name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PantryItem {
    pub description: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    pub categories: Vec<Category>,
    pub generated_at: NaiveDateTime,
}

impl ShoppingList {
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRequest {
    Drink(DrinkOrder),
    Pantry(PantryItem),
    Shopping(ShoppingList),
}

#[derive(Deserialize)]
struct ShoppingPayload {
    #[serde(default)]
    categories: Option<Vec<CategoryPayload>>,
    #[serde(default)]
    receipt_items: Option<Vec<ReceiptItem>>,
    #[serde(default)]
    generated_at: Option<String>,
}

#[derive(Deserialize)]
struct CategoryPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Deserialize)]
struct ReceiptItem {
    #[serde(default)]
    category: String,
    #[serde(default)]
    ingredients: Vec<String>,
}

const GENERATED_AT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

fn require(field: &str, value: &str) -> LabelResult<()> {
    if value.trim().is_empty() {
        return Err(LabelError::Payload(format!("'{}' must not be empty", field)));
    }
    Ok(())
}

/// Strip checkbox and bullet markers an upstream list may already carry.
pub fn clean_item(raw: &str) -> String {
    raw.trim()
        .replace("[ ]", "")
        .replace("[x]", "")
        .replace("- ", "")
        .trim()
        .to_string()
}

fn category(name: &str, items: &[String]) -> Option<Category> {
    let name = name.trim();
    let items: Vec<String> = items
        .iter()
        .map(|i| clean_item(i))
        .filter(|i| !i.is_empty())
        .collect();
    if name.is_empty() || items.is_empty() {
        return None;
    }
    Some(Category {
        name: name.to_string(),
        items,
    })
}

fn parse_generated_at(raw: Option<&str>) -> LabelResult<NaiveDateTime> {
    let Some(raw) = raw else {
        return Ok(Local::now().naive_local());
    };
    GENERATED_AT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| LabelError::Payload(format!("bad generated_at '{}'", raw)))
}

impl LabelRequest {
    pub fn parse(kind: LabelKind, json: &str) -> LabelResult<Self> {
        match kind {
            LabelKind::Drink => {
                let order: DrinkOrder = serde_json::from_str(json)?;
                require("customer_name", &order.customer_name)?;
                require("drink_name", &order.drink_name)?;
                Ok(LabelRequest::Drink(order))
            }
            LabelKind::Pantry => {
                let item: PantryItem = serde_json::from_str(json)?;
                require("description", &item.description)?;
                Ok(LabelRequest::Pantry(item))
            }
            LabelKind::Shopping => {
                let payload: ShoppingPayload = serde_json::from_str(json)?;
                let categories: Vec<Category> = match (payload.categories, payload.receipt_items) {
                    (Some(cats), _) => cats.iter().filter_map(|c| category(&c.name, &c.items)).collect(),
                    (None, Some(items)) => items
                        .iter()
                        .filter_map(|r| category(&r.category, &r.ingredients))
                        .collect(),
                    (None, None) => {
                        return Err(LabelError::Payload(
                            "expected 'categories' or 'receipt_items'".into(),
                        ));
                    }
                };
                Ok(LabelRequest::Shopping(ShoppingList {
                    categories,
                    generated_at: parse_generated_at(payload.generated_at.as_deref())?,
                }))
            }
        }
    }

    pub fn kind(&self) -> LabelKind {
        match self {
            LabelRequest::Drink(_) => LabelKind::Drink,
            LabelRequest::Pantry(_) => LabelKind::Pantry,
            LabelRequest::Shopping(_) => LabelKind::Shopping,
        }
    }

    pub fn role(&self) -> &'static str {
        self.kind().role()
    }
}

/// Side-channel image file name for a customer.
///
/// ```
/// use labelpress::label::drink_image_name;
///
/// assert_eq!(drink_image_name("Mary O'Neil"), "maryoneil.bmp");
/// ```
pub fn drink_image_name(customer_name: &str) -> String {
    let stem: String = customer_name
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '\'')
        .collect();
    format!("{}.bmp", stem)
}

/// `<assets_dir>/drink_images/<name>.bmp`
pub fn drink_image_path(assets_dir: &Path, customer_name: &str) -> PathBuf {
    assets_dir
        .join("drink_images")
        .join(drink_image_name(customer_name))
}

use std::collections::HashMap;

use tera::{Tera, Value};

pub const LAYOUT: &str = "layout.html";
pub const HOMEPAGE: &str = "homepage.html";
pub const PRODUCT: &str = "product.html";
pub const NOT_FOUND: &str = "404.html";

/// Builds the page templates compiled into the binary.
pub fn init_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    register_template_filters(&mut tera);

    // Registered together so `{% extends %}` resolves regardless of order.
    tera.add_raw_templates(vec![
        (LAYOUT, include_str!("../templates/layout.html")),
        (HOMEPAGE, include_str!("../templates/homepage.html")),
        (PRODUCT, include_str!("../templates/product.html")),
        (NOT_FOUND, include_str!("../templates/404.html")),
    ])?;

    Ok(tera)
}

pub fn register_template_filters(tera: &mut Tera) {
    tera.register_filter("money", tera_money_filter);
}

/// Formats a price as euros with two decimals.
/// Usage: `product.price | money`
fn tera_money_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let amount = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(raw) => raw
            .parse::<f64>()
            .map_err(|_| tera::Error::msg(format!("money filter cannot format `{raw}`")))?,
        _ => 0.0,
    };
    Ok(Value::String(format!("€{amount:.2}")))
}

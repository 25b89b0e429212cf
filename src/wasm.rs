//! wasm-bindgen entry points for the kitchen display front-ends.
//!
//! Tickets and results cross the boundary as plain JS objects with the
//! camelCase field names of the order system. The menu catalog is a JS
//! object mapping menu-item id to `complexityBase`.

use crate::catalog::MenuCatalog;
use crate::error::PrioritizerError;
use crate::ranking::QueueRanker;
use crate::scoring::{KitchenLoad, PriorityScorer};
use crate::ticket::Ticket;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

fn invalid_ticket(e: serde_wasm_bindgen::Error) -> JsValue {
    JsValue::from_str(
        &PrioritizerError::InvalidTicket {
            reason: e.to_string(),
        }
        .to_string(),
    )
}

fn catalog_from_js(catalog: JsValue) -> Result<MenuCatalog, JsValue> {
    if catalog.is_undefined() || catalog.is_null() {
        return Ok(MenuCatalog::new());
    }
    let items: HashMap<String, f64> = serde_wasm_bindgen::from_value(catalog)
        .map_err(|e| JsValue::from_str(&format!("invalid catalog: {e}")))?;
    Ok(items.into_iter().collect())
}

fn load_or_default(kitchen_load: Option<i32>) -> KitchenLoad {
    kitchen_load.map(KitchenLoad).unwrap_or_default()
}

/// Scores one ticket. `kitchenLoad` defaults to 50.
#[wasm_bindgen(js_name = calculatePriority)]
pub fn calculate_priority(
    ticket: JsValue,
    catalog: JsValue,
    kitchen_load: Option<i32>,
) -> Result<JsValue, JsValue> {
    let ticket: Ticket = serde_wasm_bindgen::from_value(ticket).map_err(invalid_ticket)?;
    let scorer = PriorityScorer::new(catalog_from_js(catalog)?);
    let priority = scorer.calculate_priority(&ticket, load_or_default(kitchen_load));
    serde_wasm_bindgen::to_value(&priority).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Ranks an array of tickets, most urgent first. `kitchenLoad` defaults to 50.
#[wasm_bindgen(js_name = sortTicketsByPriority)]
pub fn sort_tickets_by_priority(
    tickets: JsValue,
    catalog: JsValue,
    kitchen_load: Option<i32>,
) -> Result<JsValue, JsValue> {
    let tickets: Vec<Ticket> = serde_wasm_bindgen::from_value(tickets).map_err(invalid_ticket)?;
    let ranker = QueueRanker::new(PriorityScorer::new(catalog_from_js(catalog)?));
    let ranked = ranker.sort_tickets_by_priority(&tickets, load_or_default(kitchen_load));
    serde_wasm_bindgen::to_value(&ranked).map_err(|e| JsValue::from_str(&e.to_string()))
}

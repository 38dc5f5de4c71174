//! Provider response classification and message sanitization.
//!
//! The provider reports failure in three wire shapes: a top-level
//! `error.errorMessage`, an order with `status = "Error"` carrying a single
//! error object, or the same carrying a list of error objects. All three
//! collapse to one sanitized message string. A top-level error wins over
//! whatever the order status says.

use xml_codec::Value;

/// What a decoded `apiResponse` body turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Classification {
    /// The provider accepted the order; carries the `orders.order` subtree.
    Success(Value),
    /// The provider rejected the request; carries the sanitized message.
    ProviderError(String),
    /// Neither the success shape nor any known error shape.
    Unrecognized,
}

pub(crate) fn classify(response: &Value) -> Classification {
    if let Some(message) = top_level_error(response) {
        return Classification::ProviderError(sanitize(&message));
    }

    let Some(order) = response.get("orders").and_then(|orders| orders.get("order")) else {
        return Classification::Unrecognized;
    };

    match order.get("status").and_then(Value::as_text) {
        Some("Created") => Classification::Success(order.clone()),
        Some("Error") => match order.get("errors").and_then(|errors| errors.get("error")) {
            Some(error) => Classification::ProviderError(sanitize(&collect_messages(error))),
            None => Classification::Unrecognized,
        },
        _ => Classification::Unrecognized,
    }
}

/// The `error.errorMessage` text of a top-level provider error, if present.
pub(crate) fn top_level_error(response: &Value) -> Option<String> {
    response
        .get("error")?
        .get("errorMessage")?
        .as_text()
        .map(str::to_owned)
}

// A single error object contributes its message as-is; a list contributes
// each message followed by a space, trailing space included. Callers depend
// on that exact concatenation.
fn collect_messages(error: &Value) -> String {
    match error {
        Value::Seq(items) => {
            let mut joined = String::new();
            for item in items {
                if let Some(message) = item.get("errorMessage").and_then(Value::as_text) {
                    joined.push_str(message);
                    joined.push(' ');
                }
            }
            joined
        }
        single => single
            .get("errorMessage")
            .and_then(Value::as_text)
            .unwrap_or_default()
            .to_owned(),
    }
}

/// Strip literal double quotes and collapse `->` to `-`.
///
/// Normalizes provider message formatting quirks; the exact transform is
/// load-bearing for callers matching on message text.
pub(crate) fn sanitize(message: &str) -> String {
    message.replace('"', "").replace("->", "-")
}

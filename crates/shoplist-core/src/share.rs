//! Share tokens: a whole list packed into one URL query parameter.
//!
//! The payload is the JSON list of items, base64 encoded with the URL-safe
//! alphabet. Decoding also accepts the standard alphabet, padded or not, so
//! links produced by other encoders keep working.

use crate::error::ShareError;
use crate::models::{Category, Item};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;
use url::Url;

/// Query parameter carrying the token.
pub const SHARE_PARAM: &str = "list";

/// Title offered to share targets.
pub const SHARE_TITLE: &str = "Shopping List";

/// Encode `items` as a share token.
///
/// Returns `None` if the list cannot be serialized.
pub fn encode(items: &[Item]) -> Option<String> {
    match serde_json::to_vec(items) {
        Ok(payload) => Some(URL_SAFE_NO_PAD.encode(payload)),
        Err(e) => {
            tracing::error!("Failed to serialize list for sharing: {}", e);
            None
        }
    }
}

/// Decode a share token, keeping every element that is a well-formed item.
///
/// A token that cannot be decoded at all yields an empty list.
pub fn decode(token: &str) -> Vec<Item> {
    match try_decode(token) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Ignoring shared list: {}", e);
            Vec::new()
        }
    }
}

/// Decode a share token, reporting why the token as a whole was rejected.
///
/// Individual malformed elements are dropped rather than failing the decode.
pub fn try_decode(token: &str) -> Result<Vec<Item>, ShareError> {
    let bytes = URL_SAFE_NO_PAD.decode(normalize(token))?;
    let payload: Value = serde_json::from_slice(&bytes)?;
    let Value::Array(elements) = payload else {
        return Err(ShareError::NotAnArray);
    };

    let total = elements.len();
    let items: Vec<Item> = elements.iter().filter_map(validate).collect();
    if items.len() < total {
        tracing::warn!(
            "Dropped {} malformed item(s) from shared list",
            total - items.len()
        );
    }
    Ok(items)
}

/// Map a token in any base64 dialect onto the unpadded URL-safe alphabet.
fn normalize(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| *c != '=')
        .map(|c| match c {
            // A '+' that went through form decoding arrives as a space.
            '+' | ' ' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Check one payload element field by field.
fn validate(value: &Value) -> Option<Item> {
    let fields = value.as_object()?;

    let id = fields.get("id")?.as_i64()?;
    let name = fields.get("name")?.as_str()?;
    let quantity = fields.get("quantity")?.as_i64()?;
    let category = fields.get("category")?.as_str()?;
    let purchased = fields.get("purchased")?.as_bool()?;
    let created_at = fields.get("createdAt")?.as_str()?;

    let category = match category.parse::<Category>() {
        Ok(category) => category,
        Err(e) => {
            tracing::debug!("Dropping shared item {}: {}", id, e);
            return None;
        }
    };

    Some(Item {
        id,
        name: name.to_string(),
        quantity,
        category,
        purchased,
        created_at: created_at.to_string(),
    })
}

/// Build the link that carries `items`.
///
/// The link is `location` reduced to origin and path with the token as its
/// only query parameter. If the list cannot be encoded, `location` itself is
/// returned.
pub fn share_url(location: &Url, items: &[Item]) -> Url {
    let Some(token) = encode(items) else {
        return location.clone();
    };

    let mut url = location.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(SHARE_PARAM, &token);
    url
}

/// Text offered alongside a share link.
pub fn share_message(items: &[Item]) -> String {
    format!("Check out my shopping list with {} items!", items.len())
}

/// A list recovered from a location, with the location it should become.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedList {
    pub items: Vec<Item>,
    /// The consumed location without the share parameter.
    pub stripped: Url,
}

/// Consume a share token carried by `location`.
///
/// Returns `None` when there is no token or it holds no valid items; in that
/// case the location should be left alone.
pub fn take_shared_list(location: &Url) -> Option<SharedList> {
    let token = location
        .query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned())?;

    let items = decode(&token);
    if items.is_empty() {
        tracing::info!("Shared list in location is empty or invalid, ignoring");
        return None;
    }

    let remaining: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = location.clone();
    if remaining.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(remaining);
    }

    tracing::info!("Loaded {} items from shared list", items.len());
    Some(SharedList { items, stripped })
}

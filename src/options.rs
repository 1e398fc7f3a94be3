// ABOUTME: Directive option string parsing for the soapbox slide compiler
// ABOUTME: Turns "tpl=hpi,bg=photo.png,flag" strings into key/value maps

use std::collections::HashMap;

/// Parse a comma separated option string into a map.
///
/// A token of the form `key=value` maps `key` to `Some(value)`; a bare `key`
/// token maps to `None` and acts as a boolean flag. Unknown keys pass through
/// untouched so new options can be introduced without breaking old decks.
/// This never fails: empty input yields an empty map.
///
/// Example: `"tpl=hpi,title=Over the rainbow"` becomes
/// `{ "tpl" => Some("hpi"), "title" => Some("Over the rainbow") }`.
pub fn parse_options(option_string: &str) -> HashMap<String, Option<String>> {
    let mut result = HashMap::new();

    for element in option_string.split(',') {
        if element.is_empty() {
            continue;
        }
        match element.split_once('=') {
            Some((key, value)) if !value.is_empty() => {
                result.insert(key.to_string(), Some(value.to_string()));
            }
            Some((key, _)) => {
                // "key=" behaves like a bare flag
                result.insert(key.to_string(), None);
            }
            None => {
                result.insert(element.to_string(), None);
            }
        }
    }

    result
}

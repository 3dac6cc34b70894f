//! Response parsing and field lookup.

use roxmltree::{Document, Node};

use crate::error::{CodecError, Result};

/// Marker the server embeds when the session token is no longer valid.
const SESSION_INVALID_MARKER: &str = "no_valid_session";

/// Whether a raw body reports an expired or unknown session.
pub fn is_session_invalid(body: &str) -> bool {
    body.contains(SESSION_INVALID_MARKER)
}

/// One `<member>` of the response, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Field {
    name: String,
    /// Scalar text, or `None` when the value is a struct or array.
    text: Option<String>,
    /// Names of enclosing members, innermost first.
    parents: Vec<String>,
}

/// A response body reduced to named scalar fields.
///
/// Every `<member>` at any depth becomes a field. Lookups return the first
/// match in document order; repeated keys form list columns whose Nth entry
/// belongs to the Nth list element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    fields: Vec<Field>,
}

impl Response {
    /// Parses a raw body.
    ///
    /// Characters that are neither printable nor XML whitespace are dropped
    /// first; the server occasionally emits them around the payload.
    pub fn parse(body: &str) -> Result<Self> {
        let cleaned: String = body
            .chars()
            .filter(|&c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
            .filter(|&c| c != '\u{feff}')
            .collect();

        let document = Document::parse(&cleaned).map_err(|source| CodecError::Malformed {
            body: body.to_string(),
            source,
        })?;

        let fields = document
            .descendants()
            .filter(|node| node.has_tag_name("member"))
            .filter_map(|member| {
                let name = member_name(member)?;
                let text = child(member, "value").and_then(scalar_text);
                let parents = member
                    .ancestors()
                    .skip(1)
                    .filter(|node| node.has_tag_name("member"))
                    .filter_map(member_name)
                    .collect();
                Some(Field {
                    name,
                    text,
                    parents,
                })
            })
            .collect();

        Ok(Self { fields })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scalar(key).is_some()
    }

    /// First scalar value stored under `key`.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == key && field.text.is_some())
            .and_then(|field| field.text.as_deref())
    }

    /// Every scalar value stored under `key`, in document order.
    pub fn scalars<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.name == key)
            .filter_map(|field| field.text.as_deref())
    }

    /// First scalar stored under `key` inside the member named `outer`.
    pub fn nested_scalar(&self, outer: &str, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| {
                field.name == key
                    && field.text.is_some()
                    && field.parents.iter().any(|parent| parent == outer)
            })
            .and_then(|field| field.text.as_deref())
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.scalar(key).map(str::to_string)
    }

    pub fn int(&self, key: &str) -> Result<Option<i32>> {
        self.scalar(key).map(|raw| parse_int(key, raw)).transpose()
    }

    pub fn ints(&self, key: &str) -> Result<Vec<i32>> {
        self.scalars(key).map(|raw| parse_int(key, raw)).collect()
    }

    pub fn nested_int(&self, outer: &str, key: &str) -> Result<Option<i32>> {
        self.nested_scalar(outer, key)
            .map(|raw| parse_int(key, raw))
            .transpose()
    }

    /// Booleans travel as `0`/`1`.
    pub fn boolean(&self, key: &str) -> Result<Option<bool>> {
        self.scalar(key).map(|raw| parse_bool(key, raw)).transpose()
    }

    pub fn require_int(&self, key: &str) -> Result<i32> {
        self.int(key)?.ok_or_else(|| missing(key))
    }

    pub fn require_string(&self, key: &str) -> Result<String> {
        self.string(key).ok_or_else(|| missing(key))
    }

    pub fn require_bool(&self, key: &str) -> Result<bool> {
        self.boolean(key)?.ok_or_else(|| missing(key))
    }

    pub fn require_nested_int(&self, outer: &str, key: &str) -> Result<i32> {
        self.nested_int(outer, key)?
            .ok_or_else(|| CodecError::MissingField(format!("{outer}.{key}")))
    }
}

fn missing(key: &str) -> CodecError {
    CodecError::MissingField(key.to_string())
}

fn parse_int(key: &str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| CodecError::invalid(key, raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(CodecError::invalid(key, raw)),
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(tag))
}

fn member_name(member: Node<'_, '_>) -> Option<String> {
    child(member, "name")
        .and_then(|name| name.text())
        .map(|text| text.trim().to_string())
}

/// Text of a scalar `<value>`; `None` for structs and arrays.
///
/// A `<value>` without a type element is a string, per XML-RPC.
fn scalar_text(value: Node<'_, '_>) -> Option<String> {
    match value.children().find(|node| node.is_element()) {
        Some(typed) => match typed.tag_name().name() {
            "i4" | "int" | "boolean" | "string" | "double" => {
                Some(typed.text().unwrap_or_default().to_string())
            }
            _ => None,
        },
        None => Some(value.text().unwrap_or_default().to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn scalar_lookup_reads_typed_values() {
        let response = Response::parse(&body(&[
            int("gold", 2892),
            string("name", "Rook"),
            boolean("item_found", true),
        ]))
        .unwrap();

        assert_eq!(response.int("gold").unwrap(), Some(2892));
        assert_eq!(response.string("name").as_deref(), Some("Rook"));
        assert_eq!(response.boolean("item_found").unwrap(), Some(true));
    }

    #[test]
    fn absent_key_is_not_an_error() {
        let response = Response::parse(&body(&[int("gold", 1)])).unwrap();
        assert_eq!(response.int("fame").unwrap(), None);
        assert!(!response.contains("fame"));
        assert!(matches!(
            response.require_int("fame"),
            Err(CodecError::MissingField(key)) if key == "fame"
        ));
    }

    #[test]
    fn repeated_keys_keep_document_order() {
        let list = format!(
            "<member><name>list</name><value><array><data>\
             <value><struct>{}{}</struct></value>\
             <value><struct>{}{}</struct></value>\
             </data></array></value></member>",
            int("quest_id", 7),
            int("gold", 10),
            int("quest_id", 9),
            int("gold", 20),
        );
        let response = Response::parse(&body(&[list])).unwrap();

        assert_eq!(response.ints("quest_id").unwrap(), vec![7, 9]);
        assert_eq!(response.ints("gold").unwrap(), vec![10, 20]);
        assert!(response.ints("exp").unwrap().is_empty());
    }

    #[test]
    fn nested_lookup_is_scoped_to_the_outer_member() {
        let response = Response::parse(&body(&[
            nested("self", &[int("hitpoints", 7533), int("total_damage", 1)]),
            nested("opponent", &[int("hitpoints", 99), int("total_damage", 2798)]),
        ]))
        .unwrap();

        assert_eq!(response.nested_int("self", "hitpoints").unwrap(), Some(7533));
        assert_eq!(
            response.nested_int("opponent", "total_damage").unwrap(),
            Some(2798)
        );
        assert_eq!(response.nested_int("opponent", "magic_damage").unwrap(), None);
        // Struct-valued members are not scalars.
        assert!(!response.contains("self"));
    }

    #[test]
    fn untyped_value_is_a_string() {
        let response = Response::parse(
            "<methodResponse><params><param><value><struct>\
             <member><name>guild_name</name><value>Night Watch</value></member>\
             </struct></value></param></params></methodResponse>",
        )
        .unwrap();
        assert_eq!(response.string("guild_name").as_deref(), Some("Night Watch"));
    }

    #[test]
    fn non_numeric_int_is_invalid() {
        let response = Response::parse(&body(&[string("gold", "lots")])).unwrap();
        assert!(matches!(
            response.int("gold"),
            Err(CodecError::InvalidValue { key, value }) if key == "gold" && value == "lots"
        ));
    }

    #[test]
    fn unparsable_markup_is_malformed_and_keeps_the_body() {
        let raw = "<html><body>Service Unavailable";
        match Response::parse(raw) {
            Err(CodecError::Malformed { body, .. }) => assert_eq!(body, raw),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn stray_control_characters_are_ignored() {
        let raw = format!("\u{feff}\u{1}{}", body(&[int("fame", 1639)]));
        let response = Response::parse(&raw).unwrap();
        assert_eq!(response.int("fame").unwrap(), Some(1639));
    }

    #[test]
    fn session_marker_is_detected_anywhere() {
        assert!(is_session_invalid(
            "<methodResponse><fault><value><string>no_valid_session</string></value></fault></methodResponse>"
        ));
        assert!(!is_session_invalid(&body(&[int("gold", 1)])));
    }
}

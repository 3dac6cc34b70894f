//! Request encoding.

use std::fmt::Write;

/// Remote methods the bot calls, displayed as their `<methodName>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum Method {
    MiniUpdate,
    GetAdventures,
    StartAdventure,
    GetPvpData,
    Fight,
    #[strum(serialize = "EvocationCircle_getCircle")]
    GetCircle,
    #[strum(serialize = "EvocationCircle_buyNode")]
    BuyCircleNode,
    GetUserAttributes,
    RaiseAttribute,
    GetWorkData,
    StartWork,
    GetMapDetails,
    ExploreCave,
}

/// A method call ready to be encoded.
///
/// The session token is kept separate from the arguments so a refreshed token
/// can be substituted before the call is re-issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodCall {
    pub method: Method,
    pub session: String,
    pub string_arg: Option<String>,
    pub int_arg: Option<i32>,
}

impl MethodCall {
    pub fn new(method: Method, session: impl Into<String>) -> Self {
        Self {
            method,
            session: session.into(),
            string_arg: None,
            int_arg: None,
        }
    }

    pub fn with_string(mut self, value: impl Into<String>) -> Self {
        self.string_arg = Some(value.into());
        self
    }

    pub fn with_int(mut self, value: i32) -> Self {
        self.int_arg = Some(value);
        self
    }

    /// Replaces the session token carried by this call.
    pub fn set_session(&mut self, session: impl Into<String>) {
        self.session = session.into();
    }

    /// Renders the request body.
    ///
    /// Positional order is session token, string argument, integer argument.
    /// The server rejects any other order.
    pub fn encode(&self) -> String {
        let mut body = String::with_capacity(256);
        body.push_str("<methodCall><methodName>");
        body.push_str(self.method.into());
        body.push_str("</methodName><params>");

        push_string_param(&mut body, &self.session);
        if let Some(value) = &self.string_arg {
            push_string_param(&mut body, value);
        }
        if let Some(value) = self.int_arg {
            // Writing to a String cannot fail.
            let _ = write!(body, "<param><value><int>{value}</int></value></param>");
        }

        body.push_str("</params></methodCall>");
        body
    }
}

fn push_string_param(body: &mut String, value: &str) {
    body.push_str("<param><value><string>");
    escape_into(body, value);
    body.push_str("</string></value></param>");
}

fn escape_into(body: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => body.push_str("&amp;"),
            '<' => body.push_str("&lt;"),
            '>' => body.push_str("&gt;"),
            '"' => body.push_str("&quot;"),
            '\'' => body.push_str("&apos;"),
            c => body.push(c),
        }
    }
}

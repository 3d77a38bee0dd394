//! Action registry: the static catalog of action kinds.
//!
//! Adding a kind means adding an [`ActionKind`] variant, its entry in
//! [`ACTIONS`] and its template in [`crate::template`].

use serde::Serialize;
use std::fmt;

/// Registered action kinds, in catalog order.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    #[serde(rename = "Connect to Site")]
    ConnectToSite,
    #[serde(rename = "Click Element")]
    ClickElement,
    #[serde(rename = "Fill Text Input")]
    FillTextInput,
    #[serde(rename = "Login with Credentials")]
    LoginWithCredentials,
    #[serde(rename = "Assert Element Presence")]
    AssertElementPresence,
    #[serde(rename = "Navigate to URL")]
    NavigateToUrl,
    #[serde(rename = "Take Screenshot")]
    TakeScreenshot,
    #[serde(rename = "Wait")]
    Wait,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::ConnectToSite,
        ActionKind::ClickElement,
        ActionKind::FillTextInput,
        ActionKind::LoginWithCredentials,
        ActionKind::AssertElementPresence,
        ActionKind::NavigateToUrl,
        ActionKind::TakeScreenshot,
        ActionKind::Wait,
    ];

    /// Display string used as the step `kind`.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::ConnectToSite => "Connect to Site",
            ActionKind::ClickElement => "Click Element",
            ActionKind::FillTextInput => "Fill Text Input",
            ActionKind::LoginWithCredentials => "Login with Credentials",
            ActionKind::AssertElementPresence => "Assert Element Presence",
            ActionKind::NavigateToUrl => "Navigate to URL",
            ActionKind::TakeScreenshot => "Take Screenshot",
            ActionKind::Wait => "Wait",
        }
    }

    /// Exact, case-sensitive lookup by display string.
    pub fn parse(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == kind)
    }

    pub fn spec(self) -> &'static ActionSpec {
        // ACTIONS is laid out in ALL order
        &ACTIONS[self as usize]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named parameter of an action form.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ActionParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// An action kind with its ordered parameter schema.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub params: &'static [ActionParamSpec],
}

impl ActionSpec {
    pub fn param_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|param| param.name)
    }
}

const fn param(
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    description: &'static str,
) -> ActionParamSpec {
    ActionParamSpec {
        name,
        label,
        placeholder,
        description: Some(description),
    }
}

const SELECTOR_TYPE: ActionParamSpec = param(
    "selectorType",
    "Selector Type",
    "css or xpath",
    "Type of selector (css or xpath)",
);

pub static ACTIONS: [ActionSpec; 8] = [
    ActionSpec {
        kind: ActionKind::ConnectToSite,
        params: &[param(
            "url",
            "URL",
            "https://example.com",
            "The URL of the website to connect to",
        )],
    },
    ActionSpec {
        kind: ActionKind::ClickElement,
        params: &[
            param(
                "selector",
                "CSS/XPath Selector",
                "#submit-button or //button[@id='submit']",
                "CSS or XPath selector for the element to click",
            ),
            SELECTOR_TYPE,
        ],
    },
    ActionSpec {
        kind: ActionKind::FillTextInput,
        params: &[
            param(
                "selector",
                "CSS/XPath Selector",
                "#username or //input[@name='username']",
                "CSS or XPath selector for the input field",
            ),
            SELECTOR_TYPE,
            param(
                "text",
                "Text to Enter",
                "username123",
                "Text to enter into the input field",
            ),
        ],
    },
    ActionSpec {
        kind: ActionKind::LoginWithCredentials,
        params: &[
            param(
                "usernameSelector",
                "Username Field Selector",
                "#username",
                "CSS selector for the username field",
            ),
            param(
                "passwordSelector",
                "Password Field Selector",
                "#password",
                "CSS selector for the password field",
            ),
            param("username", "Username", "user@example.com", "Username to enter"),
            param("password", "Password", "password123", "Password to enter"),
            param(
                "submitSelector",
                "Submit Button Selector",
                "#login-button",
                "CSS selector for the login button",
            ),
        ],
    },
    ActionSpec {
        kind: ActionKind::AssertElementPresence,
        params: &[
            param(
                "selector",
                "CSS/XPath Selector",
                ".success-message or //div[@class='success-message']",
                "CSS or XPath selector for the element to check",
            ),
            SELECTOR_TYPE,
            param(
                "timeout",
                "Timeout (seconds)",
                "10",
                "Maximum time to wait for the element",
            ),
        ],
    },
    ActionSpec {
        kind: ActionKind::NavigateToUrl,
        params: &[param(
            "url",
            "URL",
            "https://example.com/dashboard",
            "The URL to navigate to",
        )],
    },
    ActionSpec {
        kind: ActionKind::TakeScreenshot,
        params: &[param(
            "filename",
            "Filename",
            "screenshot.png",
            "Name of the screenshot file",
        )],
    },
    ActionSpec {
        kind: ActionKind::Wait,
        params: &[param("seconds", "Seconds", "5", "Number of seconds to wait")],
    },
];

/// All registered actions in catalog order.
pub fn list_actions() -> &'static [ActionSpec] {
    &ACTIONS
}

/// Look up an action by its display string.
pub fn get_action(kind: &str) -> Option<&'static ActionSpec> {
    ActionKind::parse(kind).map(ActionKind::spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_matches_kind_order() {
        for (index, kind) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(ACTIONS[index].kind, *kind);
            assert_eq!(kind.spec().kind, *kind);
        }
    }

    #[test]
    fn kinds_and_param_names_are_unique() {
        let kinds: HashSet<_> = list_actions().iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds.len(), list_actions().len());

        for action in list_actions() {
            let names: HashSet<_> = action.param_names().collect();
            assert_eq!(names.len(), action.params.len(), "{}", action.kind);
        }
    }

    #[test]
    fn param_order_follows_catalog() {
        let names = |kind: &str| get_action(kind).unwrap().param_names().collect::<Vec<_>>();

        assert_eq!(names("Connect to Site"), vec!["url"]);
        assert_eq!(names("Click Element"), vec!["selector", "selectorType"]);
        assert_eq!(
            names("Fill Text Input"),
            vec!["selector", "selectorType", "text"]
        );
        assert_eq!(
            names("Login with Credentials"),
            vec![
                "usernameSelector",
                "passwordSelector",
                "username",
                "password",
                "submitSelector"
            ]
        );
        assert_eq!(
            names("Assert Element Presence"),
            vec!["selector", "selectorType", "timeout"]
        );
        assert_eq!(names("Navigate to URL"), vec!["url"]);
        assert_eq!(names("Take Screenshot"), vec!["filename"]);
        assert_eq!(names("Wait"), vec!["seconds"]);
    }

    #[test]
    fn lookup_is_exact() {
        assert!(get_action("Wait").is_some());
        assert!(get_action("wait").is_none());
        assert!(get_action("Scroll Page").is_none());
    }

    #[test]
    fn kind_serializes_as_display_string() {
        let value = serde_json::to_value(ActionKind::TakeScreenshot).unwrap();
        assert_eq!(value, serde_json::json!("Take Screenshot"));

        let spec = serde_json::to_value(get_action("Wait").unwrap()).unwrap();
        assert_eq!(spec["kind"], "Wait");
        assert_eq!(spec["params"][0]["name"], "seconds");
    }
}

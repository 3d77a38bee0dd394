//! Code template engine.
//!
//! [`render`] turns an action kind and its parameter values into a block of
//! Python Selenium source. Values are interpolated as-is: quotes inside a
//! value are not escaped and will break the generated script.

use crate::flow::StepParams;
use crate::registry::ActionKind;

const DEFAULT_WAIT_SECS: &str = "10";

/// Element lookup strategy selected by the `selectorType` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Css,
    XPath,
}

impl Locator {
    /// Only the exact value `"xpath"` selects XPath.
    pub fn from_selector_type(selector_type: Option<&str>) -> Self {
        match selector_type {
            Some("xpath") => Locator::XPath,
            _ => Locator::Css,
        }
    }

    pub fn by(self) -> &'static str {
        match self {
            Locator::Css => "By.CSS_SELECTOR",
            Locator::XPath => "By.XPATH",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Locator::Css => "CSS selector",
            Locator::XPath => "XPath",
        }
    }
}

/// Render the code fragment for `kind` with `params`.
///
/// Total and deterministic: unregistered kinds render a one-line comment,
/// missing parameters render as empty text (except `timeout`, which
/// falls back to `10`).
pub fn render(kind: &str, params: &StepParams) -> String {
    let Some(action) = ActionKind::parse(kind) else {
        tracing::warn!(kind, "Rendering unregistered action kind");
        return format!("# Unknown action type: {}", kind);
    };

    let value = |name: &str| params.get(name).map(String::as_str).unwrap_or_default();
    let locator = || Locator::from_selector_type(params.get("selectorType").map(String::as_str));

    match action {
        ActionKind::ConnectToSite => format!("driver.get(\"{}\")", value("url")),
        ActionKind::ClickElement => render_click(locator(), value("selector")),
        ActionKind::FillTextInput => {
            render_fill(locator(), value("selector"), value("text"))
        }
        ActionKind::LoginWithCredentials => render_login(
            value("usernameSelector"),
            value("passwordSelector"),
            value("username"),
            value("password"),
            value("submitSelector"),
        ),
        ActionKind::AssertElementPresence => {
            let timeout = match value("timeout") {
                "" => DEFAULT_WAIT_SECS,
                timeout => timeout,
            };
            render_assert(locator(), value("selector"), timeout)
        }
        ActionKind::NavigateToUrl => {
            format!("# Navigate to URL\ndriver.get(\"{}\")", value("url"))
        }
        ActionKind::TakeScreenshot => {
            let filename = value("filename");
            let mut code = String::new();
            code.push_str("# Take screenshot\n");
            code.push_str(&format!("driver.save_screenshot(\"{}\")\n", filename));
            code.push_str(&format!("print(f\"Screenshot saved as {}\")", filename));
            code
        }
        ActionKind::Wait => {
            let seconds = value("seconds");
            format!("# Wait for {seconds} seconds\ntime.sleep({seconds})")
        }
    }
}

fn wait_until(variable: &str, condition: &str, locator: Locator, selector: &str) -> String {
    format!(
        "{variable} = WebDriverWait(driver, {DEFAULT_WAIT_SECS}).until(\n    EC.{condition}(({}, \"{selector}\"))\n)\n",
        locator.by()
    )
}

fn render_click(locator: Locator, selector: &str) -> String {
    let mut code = format!("# Click element using {}\n", locator.label());
    code.push_str(&wait_until("element", "element_to_be_clickable", locator, selector));
    code.push_str("element.click()");
    code
}

fn render_fill(locator: Locator, selector: &str, text: &str) -> String {
    let mut code = format!("# Fill text input using {}\n", locator.label());
    code.push_str(&wait_until(
        "element",
        "presence_of_element_located",
        locator,
        selector,
    ));
    code.push_str("element.clear()\n");
    code.push_str(&format!("element.send_keys(\"{}\")", text));
    code
}

fn render_login(
    username_selector: &str,
    password_selector: &str,
    username: &str,
    password: &str,
    submit_selector: &str,
) -> String {
    let mut code = String::new();
    code.push_str("# Login with credentials\n");

    code.push_str("# Enter username\n");
    code.push_str(&wait_until(
        "username_field",
        "presence_of_element_located",
        Locator::Css,
        username_selector,
    ));
    code.push_str("username_field.clear()\n");
    code.push_str(&format!("username_field.send_keys(\"{}\")\n\n", username));

    code.push_str("# Enter password\n");
    code.push_str(&wait_until(
        "password_field",
        "presence_of_element_located",
        Locator::Css,
        password_selector,
    ));
    code.push_str("password_field.clear()\n");
    code.push_str(&format!("password_field.send_keys(\"{}\")\n\n", password));

    code.push_str("# Click submit button\n");
    code.push_str(&wait_until(
        "submit_button",
        "element_to_be_clickable",
        Locator::Css,
        submit_selector,
    ));
    code.push_str("submit_button.click()");
    code
}

fn render_assert(locator: Locator, selector: &str, timeout: &str) -> String {
    let mut code = format!("# Assert element presence using {}\n", locator.label());
    code.push_str("try:\n");
    code.push_str(&format!(
        "    element = WebDriverWait(driver, {timeout}).until(\n"
    ));
    code.push_str(&format!(
        "        EC.presence_of_element_located(({}, \"{selector}\"))\n",
        locator.by()
    ));
    code.push_str("    )\n");
    code.push_str("    print(\"Element found!\")\n");
    code.push_str("except:\n");
    code.push_str("    print(\"Element not found within timeout period\")\n");
    code.push_str(&format!(
        "    raise Exception(\"Element not found: {selector}\")"
    ));
    code
}

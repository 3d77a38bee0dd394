//! Script assembler and the downloadable script artifact.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::flow::Step;

/// Fixed name of the downloaded script.
pub const SCRIPT_FILE_NAME: &str = "selenium_script.py";

/// Import block, blank line, driver setup, blank line.
pub const PREAMBLE: &str = "from selenium import webdriver\n\
from selenium.webdriver.common.by import By\n\
from selenium.webdriver.support.ui import WebDriverWait\n\
from selenium.webdriver.support import expected_conditions as EC\n\
import time\n\
\n\
# Setup the WebDriver\n\
driver = webdriver.Chrome()\n\
\n";

/// Blank line and the commented-out teardown.
pub const EPILOGUE: &str = "\n\
\n\
# Cleanup\n\
# driver.quit()  # Uncomment to close the browser after execution\n";

/// Join each step's fragment between the fixed preamble and epilogue.
pub fn assemble(steps: &[Step]) -> String {
    let body = steps
        .iter()
        .map(|step| step.code.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut script = String::with_capacity(PREAMBLE.len() + body.len() + EPILOGUE.len());
    script.push_str(PREAMBLE);
    script.push_str(&body);
    script.push_str(EPILOGUE);
    script
}

/// Write the assembled script to `target`. A directory target receives
/// [`SCRIPT_FILE_NAME`].
pub fn export_script(steps: &[Step], target: &Path) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(SCRIPT_FILE_NAME)
    } else {
        target.to_path_buf()
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, assemble(steps))?;
    tracing::info!(path = %path.display(), steps = steps.len(), "Exported script");
    Ok(path)
}

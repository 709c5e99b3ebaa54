//! Output formatting for JSON and text modes
//!
//! Text mode prints one line per resolved module as it is resolved. JSON
//! mode collects an entry per input line and prints them as one array.

use serde::Serialize;

/// Printed in place of an internalized name too short to be useful
const NAME_PLACEHOLDER: &str = "NA/USE_URL";

/// How each resolved module is rendered in text mode
#[derive(Debug, Clone, Default)]
pub struct LineFormat {
    /// Print the module name after the repository URL
    pub with_name: bool,
    /// Use `URL => NAME` instead of `URL NAME`
    pub readable: bool,
    /// Replace the module name with an internalized token
    pub internalize: Option<Affixes>,
}

/// Prefix and suffix wrapped around an internalized module name
#[derive(Debug, Clone, Default)]
pub struct Affixes {
    pub prefix: String,
    pub suffix: String,
}

impl LineFormat {
    /// Render the output line for a module resolved to `repo_url`
    pub fn render(&self, repo_url: &str, module_path: &str) -> String {
        if !self.with_name {
            return repo_url.to_string();
        }

        let name = match &self.internalize {
            Some(affixes) => {
                let token = internalize_module_name(&affixes.prefix, module_path, &affixes.suffix);
                if token.len() < 3 {
                    NAME_PLACEHOLDER.to_string()
                } else {
                    token
                }
            }
            None => module_path.to_string(),
        };

        if self.readable {
            format!("{} => {}", repo_url, name)
        } else {
            format!("{} {}", repo_url, name)
        }
    }
}

/// Turn a module path into a filesystem-safe token
///
/// `.` and `/` become `_`; `!`, `:` and `+` are dropped. Only the first
/// whitespace-separated field is used, and a blank input yields "".
pub fn internalize_module_name(prefix: &str, module: &str, suffix: &str) -> String {
    let Some(path) = module.split_whitespace().next() else {
        return String::new();
    };

    let mut token = String::with_capacity(prefix.len() + path.len() + suffix.len());
    token.push_str(prefix);
    for c in path.chars() {
        match c {
            '.' | '/' => token.push('_'),
            '!' | ':' | '+' => {}
            _ => token.push(c),
        }
    }
    token.push_str(suffix);
    token
}

/// One input line's outcome in JSON mode
#[derive(Debug, Serialize)]
pub struct ModuleEntry {
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModuleEntry {
    pub fn resolved(module: &str, version: Option<&str>, repo: &str) -> Self {
        Self {
            module: module.to_string(),
            version: version.map(str::to_string),
            repo: Some(repo.to_string()),
            error: None,
        }
    }

    pub fn failed(module: &str, version: Option<&str>, error: &str) -> Self {
        Self {
            module: module.to_string(),
            version: version.map(str::to_string),
            repo: None,
            error: Some(error.to_string()),
        }
    }
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

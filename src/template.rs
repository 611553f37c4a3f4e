//! Placeholder substitution for canonical content.
//!
//! Entries that opt in are rendered before comparison and deployment.
//! Placeholders use the `{{key}}` form; unknown keys are left verbatim so
//! a typo never silently erases content.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());

/// Resolves all variables for substitution.
///
/// Built-in variables (`os`, `arch`, `home`) come first; manifest `[vars]`
/// entries override them on key collision.
pub fn resolve_variables(custom_vars: &HashMap<String, String>) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    vars.insert("os".to_string(), std::env::consts::OS.to_string());
    vars.insert("arch".to_string(), std::env::consts::ARCH.to_string());
    if let Some(home) = dirs::home_dir() {
        vars.insert("home".to_string(), home.display().to_string());
    }

    for (key, value) in custom_vars {
        vars.insert(key.clone(), value.clone());
    }

    vars
}

/// Substitutes placeholders in the content with variable values.
pub fn substitute(content: &str, vars: &HashMap<String, String>) -> String {
    TEMPLATE_RE
        .replace_all(content, |caps: &regex::Captures| {
            let key = caps.get(1).unwrap().as_str().trim();
            vars.get(key)
                .cloned()
                .unwrap_or_else(|| caps.get(0).unwrap().as_str().to_string())
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute() {
        let mut vars = HashMap::new();
        vars.insert("editor".to_string(), "vim".to_string());
        vars.insert("shell".to_string(), "zsh".to_string());

        let content = "Editor: {{editor}}, Shell: {{ shell }}, Unknown: {{unknown}}";
        let result = substitute(content, &vars);

        assert_eq!(result, "Editor: vim, Shell: zsh, Unknown: {{unknown}}");
    }

    #[test]
    fn test_builtin_variables() {
        let vars = resolve_variables(&HashMap::new());

        assert_eq!(vars.get("os").map(String::as_str), Some(std::env::consts::OS));
        assert_eq!(
            vars.get("arch").map(String::as_str),
            Some(std::env::consts::ARCH)
        );
    }

    #[test]
    fn test_custom_overrides_builtin() {
        let mut custom = HashMap::new();
        custom.insert("os".to_string(), "temple".to_string());

        let vars = resolve_variables(&custom);
        assert_eq!(vars.get("os").map(String::as_str), Some("temple"));
    }

    #[test]
    fn test_substitute_without_placeholders() {
        let vars = resolve_variables(&HashMap::new());
        assert_eq!(substitute("plain text\n", &vars), "plain text\n");
    }
}

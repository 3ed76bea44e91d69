use std::collections::HashMap;

/// Branch code used for any branch name missing from the table.
pub const FALLBACK_BRANCH_CODE: &str = "Other";

/// Built-in branch display names and their storage codes.
const DEFAULT_BRANCHES: &[(&str, &str)] = &[("建工店", "Jiangong"), ("鳥松店", "Niaosong")];

/// Lookup table from branch display name to the ASCII code that namespaces
/// its stored images.
#[derive(Debug, Clone)]
pub struct BranchMap {
    codes: HashMap<String, String>,
}

impl BranchMap {
    /// Built-in table with `overrides` merged on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut codes: HashMap<String, String> = DEFAULT_BRANCHES
            .iter()
            .map(|&(name, code)| (name.to_string(), code.to_string()))
            .collect();
        codes.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { codes }
    }

    pub fn code_for(&self, branch_name: &str) -> &str {
        self.codes
            .get(branch_name.trim())
            .map(String::as_str)
            .unwrap_or(FALLBACK_BRANCH_CODE)
    }
}

impl Default for BranchMap {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}

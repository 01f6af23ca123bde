//! Column registry for list views

/// Short column identifiers and the element each one renders as
pub const COLUMNS: &[(&str, &str)] = &[
    ("status", "hudson.views.StatusColumn"),
    ("weather", "hudson.views.WeatherColumn"),
    ("job", "hudson.views.JobColumn"),
    ("last-success", "hudson.views.LastSuccessColumn"),
    ("last-failure", "hudson.views.LastFailureColumn"),
    ("last-duration", "hudson.views.LastDurationColumn"),
    ("build-button", "hudson.views.BuildButtonColumn"),
    ("last-stable", "hudson.views.LastStableColumn"),
];

/// Looks up the element name for a column identifier.
#[must_use]
pub fn lookup(id: &str) -> Option<&'static str> {
    COLUMNS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, element)| *element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known() {
        assert_eq!(lookup("status"), Some("hudson.views.StatusColumn"));
        assert_eq!(lookup("build-button"), Some("hudson.views.BuildButtonColumn"));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup("Status"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_keys_unique() {
        let keys: HashSet<_> = COLUMNS.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), COLUMNS.len());
    }
}

//! List view
//!
//! A flat, filterable table of jobs with selectable columns.

use super::fields::FieldSpec;
use super::registry::ViewGenerator;
use crate::xml::Element;

const ROOT: &str = "hudson.model.ListView";

/// Properties class shared by the built-in view kinds
pub(crate) const PROPERTY_LIST: &[(&str, &str)] = &[("class", "hudson.model.View$PropertyList")];

const COMPARATOR: &str = "hudson.util.CaseInsensitiveComparator";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "name"),
    FieldSpec::optional("description", "description"),
    FieldSpec::flag("filter-executors", "filterExecutors"),
    FieldSpec::flag("filter-queue", "filterQueue"),
    FieldSpec::container("properties", PROPERTY_LIST, &[]),
    FieldSpec::job_names("job-name", "jobNames", COMPARATOR),
    FieldSpec::container("jobFilters", &[], &[]),
    FieldSpec::columns("columns", "columns"),
    FieldSpec::optional("regex", "includeRegex"),
    FieldSpec::flag("recurse", "recurse"),
    FieldSpec::tri_state("status-filter", "statusFilter"),
];

/// Generator for `hudson.model.ListView` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ListView;

impl ViewGenerator for ListView {
    fn root(&self) -> Element {
        Element::new(ROOT)
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}

//! Build pipeline view
//!
//! Renders a chain of downstream jobs starting from one root job. Requires
//! the Build Pipeline plugin on the server.

use super::fields::FieldSpec;
use super::list::PROPERTY_LIST;
use super::registry::ViewGenerator;
use crate::xml::Element;

const ROOT: &str = "au.com.centrumsystems.hudson.plugin.buildpipeline.BuildPipelineView";
const PLUGIN: &str = "build-pipeline-plugin";
const GRID_BUILDER: &[(&str, &str)] = &[(
    "class",
    "au.com.centrumsystems.hudson.plugin.buildpipeline.DownstreamProjectGridBuilder",
)];

/// Accepted console output link styles. "This Window" is not accepted.
pub const LINK_STYLES: &[&str] = &["Lightbox", "New Window"];

const GRID_FIELDS: &[FieldSpec] = &[FieldSpec::text("first-job", "firstJob", "")];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "name"),
    FieldSpec::optional("description", "description"),
    FieldSpec::flag("filter-executors", "filterExecutors"),
    FieldSpec::flag("filter-queue", "filterQueue"),
    FieldSpec::container("properties", PROPERTY_LIST, &[]),
    FieldSpec::container("gridBuilder", GRID_BUILDER, GRID_FIELDS),
    FieldSpec::text("no-of-displayed-builds", "noOfDisplayedBuilds", "1"),
    FieldSpec::text_if_set("title", "buildViewTitle"),
    FieldSpec::choice("link-style", "consoleOutputLinkStyle", LINK_STYLES, "Lightbox"),
    FieldSpec::text_if_set("css-Url", "cssUrl"),
    FieldSpec::flag("latest-job-only", "triggerOnlyLatestJob"),
    FieldSpec::flag("manual-trigger", "alwaysAllowManualTrigger"),
    FieldSpec::flag("show-parameters", "showPipelineParameters"),
    FieldSpec::flag("parameters-in-headers", "showPipelineParametersInHeaders"),
    // Read as `start-with-parameters`, not the documented `starts-with-parameters`.
    FieldSpec::flag("start-with-parameters", "startsWithParameters"),
    FieldSpec::text("refresh-frequency", "refreshFrequency", "3"),
    FieldSpec::flag("definition-header", "showPipelineDefinitionHeader"),
];

/// Generator for Build Pipeline plugin view documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineView;

impl ViewGenerator for PipelineView {
    fn root(&self) -> Element {
        Element::new(ROOT).with_attr("plugin", PLUGIN)
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}

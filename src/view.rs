// MCP Dashboard - View snapshot and HTML page

use std::collections::BTreeMap;
use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::actions::ActionStatus;
use crate::catalog::{ModelsView, ResourcesView};
use crate::invocation::InvocationFlow;
use crate::models::{Model, Resource};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ModelRow {
    pub name: String,
    /// Size as displayed, empty when the runtime sent none.
    pub size: String,
    pub status: Option<ActionStatus>,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub resources: Vec<Resource>,
    pub models: Vec<ModelRow>,
    pub loading_models: bool,
    pub error: Option<String>,
    pub selected: Option<String>,
    pub input: String,
    pub response: String,
    /// Why the last submission failed, if it did.
    pub invocation_error: Option<String>,
    pub ready: bool,
}

impl DashboardView {
    pub fn build(
        resources: &ResourcesView,
        models: &ModelsView,
        invocation: &InvocationFlow,
        statuses: &BTreeMap<String, ActionStatus>,
        ready: bool,
    ) -> Self {
        Self {
            resources: resources.resources.clone(),
            models: models.models.iter().map(|m| model_row(m, statuses)).collect(),
            loading_models: models.loading,
            error: models.error.clone(),
            selected: invocation.selected.clone(),
            input: invocation.input.clone(),
            response: invocation.response.clone(),
            invocation_error: invocation.error.clone(),
            ready,
        }
    }
}

fn model_row(model: &Model, statuses: &BTreeMap<String, ActionStatus>) -> ModelRow {
    let status = statuses.get(&model.name).copied();
    ModelRow {
        name: model.name.clone(),
        size: model.size.as_ref().map(ToString::to_string).unwrap_or_default(),
        status,
        status_label: status.map(ActionStatus::label).unwrap_or(""),
    }
}

/// Snapshot every piece of view state. Locks are taken one at a time.
pub async fn snapshot(state: &AppState) -> DashboardView {
    let resources = state.resources.read().await.clone();
    let models = state.models.read().await.clone();
    let invocation = state.invocation.read().await.clone();
    let statuses = state.actions.snapshot();
    DashboardView::build(&resources, &models, &invocation, &statuses, state.is_ready())
}

// ── HTML ────────────────────────────────────────────────────────────────────

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Characters escaped in a model name placed as one path segment. Matches the
/// unreserved set of RFC 3986 plus `:`, which Ollama tags use (`llama3:8b`).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':');

fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::from(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>MCP UI Dashboard</title></head><body>\n<h1>MCP UI Dashboard</h1>\n",
    );

    html.push_str("<h2>Available Resources</h2>\n<ul>\n");
    for r in &view.resources {
        let _ = writeln!(
            html,
            "<li><form method=\"post\" action=\"/ui/select\" style=\"display:inline\"><input type=\"hidden\" name=\"name\" value=\"{name}\"><button type=\"submit\">{name}</button></form> <span>{desc}</span></li>",
            name = escape_html(&r.name),
            desc = escape_html(&r.description),
        );
    }
    html.push_str("</ul>\n");

    html.push_str("<h2>Ollama Models</h2>\n");
    if view.loading_models {
        html.push_str("<div>Loading models...</div>\n");
    }
    if let Some(error) = &view.error {
        let _ = writeln!(html, "<div class=\"error\">{}</div>", escape_html(error));
    }
    html.push_str("<ul>\n");
    for m in &view.models {
        let seg = path_segment(&m.name);
        let _ = writeln!(
            html,
            "<li><span>{name}</span> <span>({size})</span> <span class=\"status\">{status}</span> \
             <form method=\"post\" action=\"/ui/models/{seg}/pull\" style=\"display:inline\"><button type=\"submit\">Pull</button></form> \
             <form method=\"post\" action=\"/ui/models/{seg}/delete\" style=\"display:inline\"><button type=\"submit\">Delete</button></form></li>",
            name = escape_html(&m.name),
            size = escape_html(&m.size),
            status = m.status_label,
            seg = escape_html(&seg),
        );
    }
    html.push_str("</ul>\n");

    if let Some(selected) = &view.selected {
        let _ = writeln!(
            html,
            "<div><h3>Test Resource: {selected}</h3>\n<form method=\"post\" action=\"/ui/submit\">\
             <textarea name=\"input\" rows=\"4\" placeholder=\"JSON input (if required)\">{input}</textarea><br>\
             <button type=\"submit\">Send Request</button></form>\n{error}<pre>{response}</pre></div>",
            selected = escape_html(selected),
            input = escape_html(&view.input),
            error = view
                .invocation_error
                .as_deref()
                .map(|e| format!("<div class=\"error\">{}</div>\n", escape_html(e)))
                .unwrap_or_default(),
            response = escape_html(&view.response),
        );
    }

    html.push_str("</body></html>\n");
    html
}

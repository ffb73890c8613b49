//! HTML rendering of a list page.
//!
//! Produces a self-contained fragment: heading, search box, Add button, the
//! rendered table, and the form modal when one is open. Controls carry
//! `data-method` / `data-href` attributes naming the JSON route they drive.
//! All record text is escaped, and record ids in routes are percent-encoded
//! path segments.

use awards_core::error::CoreError;
use awards_core::table::{RenderedTable, RowAction};
use awards_core::view::{FormView, PageView};
use reqwest::Url;

/// Origin used only to assemble route paths. Never requested.
const ROUTE_ORIGIN: &str = "http://dashboard.invalid";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `/pages/{segments...}`, each segment percent-encoded.
pub fn route(segments: &[&str]) -> Result<String, CoreError> {
    let mut url = Url::parse(ROUTE_ORIGIN)
        .map_err(|e| CoreError::Internal(format!("route origin: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| CoreError::Internal("route origin cannot be a base".into()))?
        .pop_if_empty()
        .push("pages")
        .extend(segments);
    Ok(url.path().to_string())
}

pub fn page(view: &PageView, singular: &str) -> Result<String, CoreError> {
    let entity = view.entity;
    let title = escape(view.title);

    let mut html = format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>\n\
         <section class=\"page\" data-entity=\"{}\">\n<h1>{title}</h1>\n",
        escape(entity)
    );
    html.push_str(&format!(
        "<div class=\"toolbar\">\n\
         <input type=\"text\" name=\"query\" placeholder=\"Search...\" value=\"{}\" \
         data-method=\"PUT\" data-href=\"{}\">\n\
         <button data-method=\"POST\" data-href=\"{}\">Add {}</button>\n\
         </div>\n",
        escape(&view.query),
        escape(&route(&[entity, "search"])?),
        escape(&route(&[entity, "form", "create"])?),
        escape(singular),
    ));

    html.push_str(&table(&view.table, entity)?);

    if view.form.open {
        html.push_str(&form(&view.form, entity)?);
    }

    html.push_str("</section>\n</body></html>\n");
    Ok(html)
}

pub fn table(table: &RenderedTable, entity: &str) -> Result<String, CoreError> {
    let mut html = String::from("<table>\n<thead><tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    if table.has_actions {
        html.push_str("<th>Actions</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.rows {
        html.push_str("<tr>");
        for cell in &row.cells {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        if table.has_actions {
            html.push_str("<td>");
            for action in &row.actions {
                html.push_str(&action_button(action, entity)?);
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    Ok(html)
}

fn action_button(action: &RowAction, entity: &str) -> Result<String, CoreError> {
    let (method, href) = match action {
        RowAction::Edit { id } => ("POST", route(&[entity, "form", "edit", id.as_str()])?),
        RowAction::Delete { id } => ("DELETE", route(&[entity, "records", id.as_str()])?),
    };
    Ok(format!(
        "<button data-method=\"{method}\" data-href=\"{}\">{}</button>",
        escape(&href),
        action.label()
    ))
}

pub fn form(form: &FormView, entity: &str) -> Result<String, CoreError> {
    let mut html = String::from("<div class=\"modal\" role=\"dialog\">\n");
    if let Some(title) = &form.title {
        html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
    }

    for field in &form.fields {
        let name = escape(field.name);
        let label = escape(field.label);
        let value = escape(&field.value);
        let input = match field.input.html_type() {
            Some(kind) => format!(
                "<input type=\"{kind}\" name=\"{name}\" placeholder=\"{label}\" value=\"{value}\">\n"
            ),
            None => format!("<textarea name=\"{name}\" placeholder=\"{label}\">{value}</textarea>\n"),
        };
        html.push_str(&input);
    }

    html.push_str(&format!(
        "<div class=\"actions\">\n\
         <button data-method=\"POST\" data-href=\"{}\">{}</button>\n\
         <button data-method=\"POST\" data-href=\"{}\">Cancel</button>\n\
         </div>\n</div>\n",
        escape(&route(&[entity, "form", "submit"])?),
        form.submit_label.unwrap_or("Save"),
        escape(&route(&[entity, "form", "cancel"])?),
    ));
    Ok(html)
}

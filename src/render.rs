/// Markup generation for the evaluation table and the applications section
use crate::collate::Collation;
use crate::schema::{self, Dimension};
use crate::score::ScoredRecord;
use crate::types::Rating;

/// Render the full table fragment: grouped two-row header, one body row
/// per project in the order given. Values are interpolated verbatim; the
/// documents are curated content, not untrusted input.
pub fn render_table(records: &[ScoredRecord], collation: &Collation) -> String {
    let mut html = String::new();

    html.push_str("<table id=\"eval-table\">\n");
    html.push_str("<thead>\n");
    html.push_str("<tr class=\"main-header\">");
    html.push_str(
        "<th class=\"sortable\" data-sort=\"name\" data-type=\"text\">Model <span class=\"sort-arrow\">▴▾</span></th>",
    );

    // Dimension group headers, each with its fixed-threshold filter toggle
    for dimension in Dimension::DISPLAY_ORDER {
        html.push_str(&format!(
            "<th colspan=\"{}\" class=\"sortable\" data-sort=\"{}\" data-type=\"number\">",
            dimension.criteria().len(),
            dimension.key()
        ));
        html.push_str("<div class=\"dimension-header-cell\">");
        html.push_str(&format!(
            "<span class=\"dimension-name\">{} <span class=\"sort-arrow\">▴▾</span></span>",
            dimension.title()
        ));
        html.push_str(&format!(
            "<div class=\"dimension-filter-tag\" data-filter=\"{}\" data-threshold=\"60\">≥60%</div>",
            dimension.key()
        ));
        html.push_str("</div></th>");
    }
    html.push_str("</tr>\n");

    // Criterion headers with the pooled tag filters
    html.push_str("<tr class=\"second-header\">");
    html.push_str("<th></th>");
    for criterion in schema::display_criteria() {
        html.push_str("<th><div class=\"criterion-header-wrapper\">");
        html.push_str(&format!("<span>{}</span>", criterion.label));

        let tags = collation.display_tags(criterion);
        if !tags.is_empty() {
            html.push_str(&format!(
                "<div class=\"criterion-tags\" data-criterion=\"{}\">",
                criterion.short_id
            ));
            for tag in tags {
                html.push_str(&format!(
                    "<span class=\"criterion-tag\" data-tag=\"{tag}\" data-criterion=\"{}\">{tag}</span>",
                    criterion.short_id
                ));
            }
            // visibility and the overflow count are handled client-side
            html.push_str(&format!(
                "<span class=\"expand-tags-btn\" data-criterion=\"{}\">+0</span>",
                criterion.short_id
            ));
            html.push_str("</div>");
        }

        html.push_str("</div></th>");
    }
    html.push_str("</tr>\n");
    html.push_str("</thead>\n");
    html.push_str("<tbody>\n");

    for (scored, row) in records.iter().zip(&collation.rows) {
        let doc = &scored.record.doc;
        let meta = &doc.project;
        let scores = &scored.scores;

        html.push_str(&format!(
            "<tr class=\"row-a\" data-name=\"{}\" data-affiliation=\"{}\" data-adaptability=\"{}\" data-usability=\"{}\" data-controllability=\"{}\" data-overall=\"{}\" data-tags=\"{}\" data-applications=\"{}\">",
            meta.name,
            meta.affiliation,
            scores.adaptability,
            scores.usability,
            scores.controllability,
            scores.overall,
            row.tags.join(","),
            row.applications.join(",")
        ));

        html.push_str("<td class=\"name-cell\">");
        if meta.link.is_empty() {
            html.push_str(&format!("<div class=\"model-name\">{}</div>", meta.name));
        } else {
            html.push_str(&format!(
                "<div class=\"model-name\"><a href=\"{}\" target=\"_blank\">{}</a></div>",
                meta.link, meta.name
            ));
        }
        if !meta.affiliation.is_empty() {
            html.push_str(&format!(
                "<div class=\"affiliation\">{}</div>",
                meta.affiliation
            ));
        }
        html.push_str("</td>");

        for criterion in schema::display_criteria() {
            let entry = (criterion.get)(doc);
            let rating = Rating::of(&entry.value);
            html.push_str(&format!(
                "<td class=\"{} data-cell\" title=\"{}\">{}</td>",
                rating.css_class(),
                entry.notes,
                rating.symbol()
            ));
        }

        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n");
    html.push_str("</table>\n");
    html
}

/// Render the pooled applications section shown above the table.
pub fn render_applications(collation: &Collation) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"applications-section\">\n");
    html.push_str("<h3 class=\"applications-title\">Musical Applications</h3>\n");
    html.push_str("<div class=\"applications-tags-container\">\n");
    for app in &collation.applications {
        html.push_str(&format!(
            "<span class=\"application-tag\" data-application=\"{app}\">{app}</span>\n"
        ));
    }
    html.push_str("</div>\n");
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

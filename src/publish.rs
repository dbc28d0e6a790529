/// Template injection and site output
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::config::ReporterConfig;
use crate::schema;
use crate::score::ScoredRecord;

/// Element ids the presentation template must provide.
pub const APPLICATIONS_ANCHOR: &str = "applications-wrapper";
pub const TABLE_ANCHOR: &str = "included-table";
pub const BUILD_TIME_ANCHOR: &str = "build-time";

/// Splice the rendered fragments into the template and write the site
/// outputs: the final HTML page and the CSV snapshot of the scored table.
pub fn publish(
    config: &ReporterConfig,
    records: &[ScoredRecord],
    table: &str,
    applications: &str,
) -> Result<()> {
    let template = fs::read_to_string(&config.template_path)
        .with_context(|| format!("reading template {}", config.template_path.display()))?;

    let stamp = Utc::now()
        .format("Table last built on %Y-%m-%d at %H:%M UTC")
        .to_string();
    let html = inject(&template, applications, table, &stamp)?;

    fs::write(&config.output_html, html)
        .with_context(|| format!("writing {}", config.output_html.display()))?;
    info!("wrote {}", config.output_html.display());

    write_csv(&config.output_csv, records)?;
    info!("wrote {}", config.output_csv.display());

    Ok(())
}

/// Inject the fragments at their anchors. All three anchors are required;
/// a template missing one fails the build instead of silently publishing
/// an incomplete page.
pub fn inject(
    template: &str,
    applications: &str,
    table: &str,
    build_message: &str,
) -> Result<String> {
    let html = append_into_element(template, APPLICATIONS_ANCHOR, applications)?;
    let html = append_into_element(&html, TABLE_ANCHOR, table)?;
    set_element_text(&html, BUILD_TIME_ANCHOR, build_message)
}

/// Opening tag of an element located by id.
struct Opening {
    /// Offset just past the `>` of the opening tag.
    tag_end: usize,
    /// Lowercased element name.
    name: String,
}

/// Insert `fragment` as the last child of the element with the given id,
/// keeping whatever content the element already has.
fn append_into_element(html: &str, id: &str, fragment: &str) -> Result<String> {
    let (_, close_start) = locate(html, id)?;
    let mut out = String::with_capacity(html.len() + fragment.len());
    out.push_str(&html[..close_start]);
    out.push_str(fragment);
    out.push_str(&html[close_start..]);
    Ok(out)
}

/// Replace the entire content of the element with the given id.
fn set_element_text(html: &str, id: &str, text: &str) -> Result<String> {
    let (opening, close_start) = locate(html, id)?;
    let mut out = String::with_capacity(html.len() + text.len());
    out.push_str(&html[..opening.tag_end]);
    out.push_str(text);
    out.push_str(&html[close_start..]);
    Ok(out)
}

/// Find an element by id and the offset of its matching closing tag.
fn locate(html: &str, id: &str) -> Result<(Opening, usize)> {
    let opening = find_opening_by_id(html, id)
        .with_context(|| format!("template has no element with id \"{id}\""))?;
    let close_start = find_closing(html, &opening.name, opening.tag_end)
        .with_context(|| format!("element \"{id}\" is never closed"))?;
    Ok((opening, close_start))
}

/// Scan tags for an opening tag carrying `id="..."` (or single quoted).
/// The id attribute must be space separated from the tag name, which every
/// serializer emits.
fn find_opening_by_id(html: &str, id: &str) -> Option<Opening> {
    let double = format!(" id=\"{id}\"");
    let single = format!(" id='{id}'");

    let mut pos = 0;
    while let Some(lt) = html[pos..].find('<') {
        let tag_start = pos + lt;
        let gt = html[tag_start..].find('>')?;
        let tag_end = tag_start + gt + 1;
        let tag = &html[tag_start..tag_end];
        pos = tag_end;

        if tag.starts_with("</") || tag.starts_with("<!") || tag.starts_with("<?") {
            continue;
        }
        if tag.contains(&double) || tag.contains(&single) {
            let name = tag_name(tag)?;
            return Some(Opening { tag_end, name });
        }
    }
    None
}

/// Offset of the matching `</name>` for an element opened just before
/// `from`, tracking nesting of same-named elements.
fn find_closing(html: &str, name: &str, from: usize) -> Option<usize> {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(lt) = html[pos..].find('<') {
        let tag_start = pos + lt;
        let gt = html[tag_start..].find('>')?;
        let tag_end = tag_start + gt + 1;
        let tag = html[tag_start..tag_end].to_ascii_lowercase();
        pos = tag_end;

        if tag.starts_with(&close) && at_name_boundary(&tag, close.len()) {
            depth -= 1;
            if depth == 0 {
                return Some(tag_start);
            }
        } else if tag.starts_with(&open)
            && at_name_boundary(&tag, open.len())
            && !tag.ends_with("/>")
        {
            depth += 1;
        }
    }
    None
}

fn at_name_boundary(tag: &str, len: usize) -> bool {
    matches!(
        tag.as_bytes().get(len),
        Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'/')
    )
}

fn tag_name(tag: &str) -> Option<String> {
    let body = tag.strip_prefix('<')?;
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

/// CSV snapshot of the scored table: flattened document fields in schema
/// order (without the project name, which indexes the table), the source
/// file, then the four score columns. Row order matches the table.
fn write_csv(path: &Path, records: &[ScoredRecord]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("writing {}", path.display()))?;

    let mut header: Vec<String> = vec![
        "project.affiliation".to_string(),
        "project.architecture".to_string(),
        "project.applications".to_string(),
        "project.link".to_string(),
        "project.notes".to_string(),
    ];
    for criterion in &schema::CRITERIA {
        let dimension = criterion.dimension.key();
        header.push(format!("{dimension}.{}.value", criterion.key));
        header.push(format!("{dimension}.{}.notes", criterion.key));
        if criterion.has_tags {
            header.push(format!("{dimension}.{}.tags", criterion.key));
        }
    }
    header.push("source.file".to_string());
    header.push("adaptability_score".to_string());
    header.push("controllability_score".to_string());
    header.push("usability_score".to_string());
    header.push("overall_score".to_string());
    writer.write_record(&header)?;

    for scored in records {
        let doc = &scored.record.doc;
        let mut row: Vec<String> = vec![
            doc.project.affiliation.clone(),
            doc.project.architecture.clone(),
            doc.project.applications.clone(),
            doc.project.link.clone(),
            doc.project.notes.clone(),
        ];
        for criterion in &schema::CRITERIA {
            let entry = (criterion.get)(doc);
            row.push(entry.value.clone());
            row.push(entry.notes.clone());
            if criterion.has_tags {
                row.push(entry.tags.clone().unwrap_or_default());
            }
        }
        row.push(scored.record.source_file.clone());
        row.push(scored.scores.adaptability.to_string());
        row.push(scored.scores.controllability.to_string());
        row.push(scored.scores.usability.to_string());
        row.push(scored.scores.overall.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

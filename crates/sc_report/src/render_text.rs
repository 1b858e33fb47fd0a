//! Plain-text renderer using an embedded template (no external assets).
//!
//! Column alignment is computed here; the template only lays out sections.

use minijinja::{context, Environment};

use crate::{ReportError, ReportModel, SectionGrid};

static TEMPLATE: &str = r#"{{ cover.title }}
{{ underline }}
{{ cover.subtitle }}

Parameters
{% for p in params %}
  {{ p.key }}: {{ p.value }}
{% endfor %}

Entities
{% for e in entities %}
  {{ e.name }}: {{ e.seats }}{{ " (" ~ e.members ~ ")" if e.members }}
{% endfor %}
{% if grid %}

Quotients
{% for line in grid %}
{{ line }}
{% endfor %}
{% endif %}
{% if deputies is not none %}

Positions
{% for d in deputies %}
  {{ d.positions }}. {{ d.candidates }} [rank {{ d.rank }}, {{ d.value }}]{{ " (lottery)" if d.lottery }}
{% endfor %}
{% endif %}
{% if footnotes %}

{% for f in footnotes %}
{{ f }}
{% endfor %}
{% endif %}

{{ integrity.engine_name }} {{ integrity.engine_version }}, input {{ integrity.input_sha256 }}
"#;

pub fn render_text(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("report.txt", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.txt")
        .map_err(|_| ReportError::Template("get_template"))?;

    let ctx = context! {
        cover => &model.cover,
        underline => "=".repeat(model.cover.title.chars().count()),
        params => &model.params,
        entities => &model.entities,
        grid => grid_lines(&model.grid),
        deputies => &model.deputies,
        footnotes => &model.footnotes,
        integrity => &model.integrity,
    };
    tmpl.render(ctx).map_err(|_| ReportError::Template("render_text"))
}

/// Fixed-width grid: name column, then one column per divisor.
/// Ranked cells carry `#rank`, tied ones a trailing `*`.
fn grid_lines(grid: &SectionGrid) -> Vec<String> {
    if grid.divisors.is_empty() {
        return Vec::new();
    }

    let header: Vec<String> = std::iter::once("".to_string())
        .chain(grid.divisors.iter().map(|d| format!("/{d}")))
        .collect();
    let body: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|r| {
            std::iter::once(format!("{} ({})", r.name, r.seats))
                .chain(r.cells.iter().map(|c| match c.rank {
                    Some(rank) => format!("{} #{rank}{}", c.value, if c.tie { "*" } else { "" }),
                    None => c.value.clone(),
                }))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(body.iter())
        .map(|row| {
            let mut line = String::new();
            for (i, (cell, w)) in row.iter().zip(&widths).enumerate() {
                let pad = w.saturating_sub(cell.chars().count());
                if i == 0 {
                    line.push_str("  ");
                    line.push_str(cell);
                    line.push_str(&" ".repeat(pad));
                } else {
                    line.push_str("  ");
                    line.push_str(&" ".repeat(pad));
                    line.push_str(cell);
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

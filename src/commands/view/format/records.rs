//! Records output formatting for list views
//!
//! ```text
//! H seernav=1 records=1 view=session title="s1" rows=2 sort=SCORE:asc focus=t1
//! S steps value=8 extra="4.0 avg"
//! R t1 TASK=t1 ERROR=- ...
//! ```

use seernav_core::view::ListView;

use super::direction_label;

/// Output in records format
pub fn output_records(list: &ListView) {
    let view = list.view();
    let sort = list
        .sort_column()
        .map(|(column, direction)| format!("{}:{}", column, direction_label(direction)))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "H seernav=1 records=1 view={} title={} rows={} sort={} focus={}",
        view.kind.name(),
        quote(&view.title),
        view.table.rows.len(),
        sort,
        list.focused_id().unwrap_or("-")
    );

    for line in &view.summary.lines {
        match &line.extra {
            Some(extra) => println!(
                "S {} value={} extra={}",
                line.label,
                field(&line.value),
                quote(extra)
            ),
            None => println!("S {} value={}", line.label, field(&line.value)),
        }
    }

    for row in &view.table.rows {
        let cells: Vec<String> = view
            .table
            .columns
            .iter()
            .zip(&row.cells)
            .map(|(column, cell)| format!("{}={}", column.name, field(cell)))
            .collect();
        println!("R {} {}", field(&row.id), cells.join(" "));
    }
}

/// Bare value unless it needs quoting
fn field(value: &str) -> String {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '"') {
        quote(value)
    } else {
        value.to_string()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_quoting() {
        assert_eq!(field("1,234"), "1,234");
        assert_eq!(field("baseline run"), "\"baseline run\"");
        assert_eq!(field(""), "\"\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}

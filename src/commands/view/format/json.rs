//! JSON output formatting for list views

use seernav_core::error::Result;
use seernav_core::view::ListView;

use super::direction_label;

/// Output in JSON format
pub fn output_json(list: &ListView) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&build_json(list))?);
    Ok(())
}

fn build_json(list: &ListView) -> serde_json::Value {
    let view = list.view();
    let table = &view.table;

    let rows: Vec<_> = table
        .rows
        .iter()
        .map(|row| {
            let cells: serde_json::Map<String, serde_json::Value> = table
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(column, cell)| (column.name.to_string(), serde_json::json!(cell)))
                .collect();
            serde_json::json!({
                "id": row.id,
                "cells": cells,
            })
        })
        .collect();

    let sort = list.sort_column().map(|(column, direction)| {
        serde_json::json!({
            "column": column,
            "direction": direction_label(direction),
        })
    });

    serde_json::json!({
        "view": view.kind.name(),
        "target": view.kind,
        "title": view.title,
        "sort": sort,
        "focus": {
            "index": list.focus(),
            "id": list.focused_id(),
        },
        "columns": table.columns,
        "rows": rows,
        "summary": view.summary.lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seernav_core::config::NavigatorConfig;
    use seernav_core::tree::ResultTree;
    use seernav_core::view::ViewKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_shape() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("s1/t1")).unwrap();
        fs::write(dir.path().join("s1/t1/index.json"), r#"{"steps": 4}"#).unwrap();

        let tree = ResultTree::open(dir.path()).unwrap();
        let mut list = ListView::open(
            tree,
            NavigatorConfig::default(),
            ViewKind::Session {
                session: "s1".into(),
            },
        )
        .unwrap();
        list.request_sort("STEPS").unwrap();

        let json = build_json(&list);
        assert_eq!(json["view"], "session");
        assert_eq!(json["target"]["session"], "s1");
        assert_eq!(json["sort"]["column"], "STEPS");
        assert_eq!(json["sort"]["direction"], "asc");
        assert_eq!(json["focus"]["id"], "t1");
        assert_eq!(json["columns"][4]["type"], "score");
        assert_eq!(json["rows"][0]["cells"]["STEPS"], "4");
    }
}

//! Static HTML rendering of an occupancy grid

use clustermap_core::{GpuSlot, OccupancyGrid};
use std::fmt::Write;

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>GPU Allocation</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 20px;
        }
        .node {
            margin-bottom: 30px;
            padding: 15px;
            border: 1px solid #ccc;
            border-radius: 4px;
        }
        .gpu-container {
            display: flex;
            gap: 10px;
            flex-wrap: wrap;
        }
        .gpu {
            width: 100px;
            height: 60px;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            color: white;
            border-radius: 4px;
            padding: 5px;
        }
        .gpu.free {
            background-color: #22c55e;
            color: black;
        }
        .gpu.occupied {
            background-color: #dc2626;
        }
        .model-name {
            font-size: 12px;
            word-break: break-word;
            text-align: center;
        }
    </style>
</head>
<body>
    <h1>GPU Allocation</h1>
"#;

const DOCUMENT_TAIL: &str = "</body>\n</html>";

/// Render the grid as a self-contained HTML document.
///
/// Nodes appear in grid order with their slots in index order, so equal
/// grids always render to identical bytes.
pub fn render(grid: &OccupancyGrid) -> String {
    let mut html = String::from(DOCUMENT_HEAD);

    for (node, slots) in grid.iter() {
        // Writing to a String cannot fail
        let _ = write!(
            html,
            "\n    <div class=\"node\">\n        <h2>{}</h2>\n        <div class=\"gpu-container\">\n",
            escape(node)
        );

        for (index, slot) in slots.iter().enumerate() {
            let status = match slot {
                GpuSlot::Free => "free",
                GpuSlot::Occupied(_) => "occupied",
            };
            let _ = write!(
                html,
                "\n            <div class=\"gpu {status}\">\n                <div>GPU {index}</div>\n"
            );
            if let Some(model) = slot.model() {
                let _ = writeln!(
                    html,
                    "                <div class=\"model-name\">{}</div>",
                    escape(model)
                );
            }
            html.push_str("            </div>\n");
        }

        html.push_str("        </div>\n    </div>\n");
    }

    html.push_str(DOCUMENT_TAIL);
    html
}

/// Escape text for use in element content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

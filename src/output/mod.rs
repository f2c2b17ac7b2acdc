pub mod terminal;

use crate::model::Record;

pub use terminal::{Renderer, TerminalRenderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Xml,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".xml") {
        return Some(OutputFormat::Xml);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn render(records: &[Record], format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(records),
        OutputFormat::Json => render_json(records),
        OutputFormat::Xml => render_xml(records),
    }
}

pub fn render_text(records: &[Record]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!("{}\t{}\t{}\t{}\n", r.id, r.name, r.email, r.role));
    }
    out.into_bytes()
}

pub fn render_json(records: &[Record]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn render_xml(records: &[Record]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str("<users>\n");
    for r in records {
        out.push_str(&format!("  <user id=\"{}\">\n", escape_xml(r.id.as_str())));
        out.push_str(&format!("    <name>{}</name>\n", escape_xml(&r.name)));
        out.push_str(&format!("    <email>{}</email>\n", escape_xml(&r.email)));
        out.push_str(&format!("    <role>{}</role>\n", escape_xml(&r.role)));
        out.push_str("  </user>\n");
    }
    out.push_str("</users>\n");
    out.into_bytes()
}

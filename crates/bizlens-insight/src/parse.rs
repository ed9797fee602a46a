//! Extraction of a JSON payload from a model reply.
//!
//! Chat models frequently wrap JSON in a markdown code fence despite being
//! asked for bare JSON. When the reply opens with a fence, everything
//! between the first fence line and the last bare closing fence is taken;
//! otherwise the trimmed reply is used as-is.

/// Strips a surrounding markdown code fence from `content`, if any.
#[must_use]
pub fn extract_json(content: &str) -> String {
    let trimmed = content.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_owned();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.trim().starts_with("```"))
        .map_or(0, |i| i + 1);
    let end = lines
        .iter()
        .rposition(|line| line.trim() == "```")
        .unwrap_or(lines.len());

    lines[start..end.max(start)].join("\n").trim().to_owned()
}

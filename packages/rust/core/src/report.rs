//! Final JSON report.

use distill_shared::{KnowledgeBatch, KnowledgeReport, Result};

/// Render the batch as the pretty-printed JSON report.
///
/// Returns `None` for an empty batch: a run that produced nothing gets a
/// diagnostic, never an empty item list.
pub fn render_report(team_id: &str, batch: &KnowledgeBatch) -> Result<Option<String>> {
    if batch.is_empty() {
        return Ok(None);
    }

    let report = KnowledgeReport {
        team_id: team_id.to_string(),
        items: batch.items().to_vec(),
    };
    Ok(Some(serde_json::to_string_pretty(&report)?))
}

use crate::error::Result;
use crate::types::FeedbackResponse;
use std::io::Write;
use std::path::Path;

const BASE_COLUMNS: [&str; 6] = ["id", "responder_id", "score", "comment", "device", "updated_at"];

/// Aspect columns: declared aspects first, then any other aspect in first-seen order
pub fn aspect_columns(rows: &[&FeedbackResponse], declared_aspects: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = declared_aspects.to_vec();
    for row in rows {
        for (aspect, _) in row.reactions.iter() {
            if !columns.iter().any(|column| column == aspect) {
                columns.push(aspect.to_string());
            }
        }
    }
    columns
}

/// Write rows as CSV with one column per aspect holding `up`, `down` or nothing
pub fn write_csv<W: Write>(
    writer: W,
    rows: &[&FeedbackResponse],
    declared_aspects: &[String],
) -> Result<()> {
    let aspects = aspect_columns(rows, declared_aspects);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = BASE_COLUMNS.iter().map(|column| column.to_string()).collect();
    header.extend(aspects.iter().cloned());
    csv_writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.id.clone(),
            row.responder_id.clone(),
            row.score.map(|score| score.to_string()).unwrap_or_default(),
            row.comment.clone().unwrap_or_default(),
            row.device().unwrap_or_default().to_string(),
            row.updated_at().unwrap_or_default().to_string(),
        ];
        record.extend(aspects.iter().map(|aspect| row.reactions.get(aspect).as_str().to_string()));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export rows to a CSV file, returning how many rows were written
pub fn export_csv_file<P: AsRef<Path>>(
    path: P,
    rows: &[&FeedbackResponse],
    declared_aspects: &[String],
) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_csv(file, rows, declared_aspects)?;
    Ok(rows.len())
}

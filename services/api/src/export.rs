use resume_ranker::error::AppError;
use resume_ranker::screening::RankedResult;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    rank: usize,
    identifier: &'a str,
    score: String,
}

/// Write a ranking as CSV with `rank,identifier,score` columns.
pub(crate) fn write_ranking<W: Write>(writer: W, ranked: &[RankedResult]) -> Result<(), AppError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["rank", "identifier", "score"])?;
    for (index, result) in ranked.iter().enumerate() {
        csv_writer.serialize(ExportRow {
            rank: index + 1,
            identifier: &result.id,
            score: format!("{:.4}", result.score),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub(crate) fn ranking_to_csv(ranked: &[RankedResult]) -> Result<String, AppError> {
    let mut buffer = Vec::new();
    write_ranking(&mut buffer, ranked)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

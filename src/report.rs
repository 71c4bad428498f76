use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::Result;
use crate::pipeline::RankedRow;
use crate::qualify::{clip, Qualification};

pub const COLUMNS: [&str; 7] = [
    "candidate",
    "skills",
    "sim",
    "exp_score",
    "exp_years",
    "exp_target",
    "total",
];

pub fn write_csv(rows: &[RankedRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
    // Header written explicitly so an empty ranking still carries the schema
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Vec<RankedRow>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RankedRow = result?;
        rows.push(row);
    }
    Ok(rows)
}

/// Sibling paths for the split export: `ranked.csv` gives
/// `ranked_qualified.csv` and `ranked_disqualified.csv`.
pub fn split_paths(path: &Path) -> (PathBuf, PathBuf) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ranking".to_string());
    (
        path.with_file_name(format!("{stem}_qualified.csv")),
        path.with_file_name(format!("{stem}_disqualified.csv")),
    )
}

pub fn write_split(
    rows: &[RankedRow],
    qualification: &Qualification,
    path: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let (qualified, disqualified) = qualification.split(rows);
    let (qualified_path, disqualified_path) = split_paths(path);
    write_csv(&qualified, &qualified_path)?;
    write_csv(&disqualified, &disqualified_path)?;
    Ok((qualified_path, disqualified_path))
}

// With a qualification, scores are shown clipped and a verdict column is added.
pub fn render_table(rows: &[RankedRow], qualification: Option<&Qualification>) -> String {
    let mut header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    if qualification.is_some() {
        header.push("qualified".to_string());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let shown = match qualification {
                Some(_) => clip(r),
                None => r.clone(),
            };
            let mut line = vec![
                shown.candidate.clone(),
                format!("{:.4}", shown.skills),
                format!("{:.4}", shown.sim),
                format!("{:.4}", shown.exp_score),
                format!("{:.2}", shown.exp_years),
                format!("{:.2}", shown.exp_target),
                format!("{:.4}", shown.total),
            ];
            if let Some(q) = qualification {
                line.push(if q.is_qualified(r) { "yes" } else { "no" }.to_string());
            }
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(&header).chain(&cells) {
        let formatted: Vec<String> = line
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| {
                if i == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        out.push_str(formatted.join("  ").trim_end());
        out.push('\n');
    }
    out
}

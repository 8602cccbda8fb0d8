use super::model::{WeightRow, WeightTable, WEIGHT_COLUMNS, WEIGHT_ROWS};
use std::{
    fmt::Write as _,
    fs,
    num::ParseFloatError,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeightsError {
    #[error("failed to access weight file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("expected {expected} weight rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} weights, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column {column}: {source}")]
    Parse {
        row: usize,
        column: usize,
        source: ParseFloatError,
    },
    #[error("row {row}, column {column}: weight is not finite")]
    NonFinite { row: usize, column: usize },
}

/// Reads a weight table: one line per ply, nine comma-separated numbers per line.
///
/// The table is returned only if every row and column checks out.
pub fn load_weights(path: impl AsRef<Path>) -> Result<WeightTable, WeightsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| WeightsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_weights(&content)
}

/// Writes the whole weight table.
///
/// With `atomic`, the table goes to a sibling temp file first and is renamed
/// over `path`, so readers never see a partially written table.
pub fn save_weights(
    weights: &WeightTable,
    path: impl AsRef<Path>,
    atomic: bool,
) -> Result<(), WeightsError> {
    let path = path.as_ref();
    let content = format_weights(weights);
    let io_error = |target: &Path| {
        let target = target.to_path_buf();
        move |source| WeightsError::Io {
            path: target,
            source,
        }
    };

    if !atomic {
        return fs::write(path, content).map_err(io_error(path));
    }

    let tmp = temp_path(path);
    fs::write(&tmp, content).map_err(io_error(&tmp))?;

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path)(source));
    }

    Ok(())
}

/// Parses exactly [`WEIGHT_ROWS`] lines; only the last one may end with a newline.
pub fn parse_weights(content: &str) -> Result<WeightTable, WeightsError> {
    let content = content.strip_suffix('\n').unwrap_or(content);
    let lines = if content.is_empty() {
        vec![]
    } else {
        content.split('\n').map(str::trim).collect::<Vec<_>>()
    };

    if let Some(row) = lines.iter().position(|line| line.is_empty()) {
        return Err(WeightsError::ColumnCount {
            row,
            expected: WEIGHT_COLUMNS,
            found: 0,
        });
    }

    if lines.len() != WEIGHT_ROWS {
        return Err(WeightsError::RowCount {
            expected: WEIGHT_ROWS,
            found: lines.len(),
        });
    }

    let mut rows = Vec::with_capacity(WEIGHT_ROWS);

    for (row, line) in lines.iter().enumerate() {
        let parts = line.split(',').collect::<Vec<_>>();

        if parts.len() != WEIGHT_COLUMNS {
            return Err(WeightsError::ColumnCount {
                row,
                expected: WEIGHT_COLUMNS,
                found: parts.len(),
            });
        }

        let mut weights: WeightRow = [0.0; WEIGHT_COLUMNS];

        for (column, part) in parts.iter().enumerate() {
            let weight = part
                .trim()
                .parse::<f64>()
                .map_err(|source| WeightsError::Parse {
                    row,
                    column,
                    source,
                })?;

            if !weight.is_finite() {
                return Err(WeightsError::NonFinite { row, column });
            }

            weights[column] = weight;
        }

        rows.push(weights);
    }

    Ok(WeightTable::from_rows(rows))
}

/// Formats with the shortest representation that parses back to the same `f64`.
pub fn format_weights(weights: &WeightTable) -> String {
    let mut content = String::with_capacity(WEIGHT_ROWS * WEIGHT_COLUMNS * 8);

    for row in weights.rows() {
        for (column, weight) in row.iter().enumerate() {
            if column != 0 {
                content.push(',');
            }
            let _ = write!(content, "{}", weight);
        }
        content.push('\n');
    }

    content
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

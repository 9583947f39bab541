//! Final board file output and JSON run report.

use halolife_core::{Grid, Partition, RunSummary, SeedStrategy};
use serde::{Deserialize, Serialize};
use std::fs::{DirBuilder, File};
use std::io::BufWriter;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Output failures. Any of them fails the job.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes final boards into one output directory.
#[derive(Debug, Clone)]
pub struct BoardExporter {
    dir: PathBuf,
}

impl BoardExporter {
    /// Exporter writing into `dir`, which need not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for a board of `board_size` run on `procs` ranks that
    /// stopped at `generation`.
    pub fn file_name(board_size: usize, procs: usize, generation: u64) -> String {
        format!("final_board_{board_size}_procs_{procs}_gen_{generation}.txt")
    }

    /// Creates the output directory (world-writable on Unix) if it is missing.
    pub fn ensure_dir(&self) -> Result<(), ExportError> {
        if self.dir.is_dir() {
            return Ok(());
        }

        info!("Creating directory: {}", self.dir.display());
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o777);
        }

        builder.create(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Writes `grid` and returns the path written.
    ///
    /// The file is only opened once the directory is known to exist.
    pub fn write(&self, grid: &Grid, procs: usize, generation: u64) -> Result<PathBuf, ExportError> {
        self.ensure_dir()?;

        let path = self
            .dir
            .join(Self::file_name(grid.size(), procs, generation));
        let write_err = |source| ExportError::Write {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(write_err)?;
        grid.write_text(BufWriter::new(file)).map_err(write_err)?;

        info!("Wrote final board to {}", path.display());
        Ok(path)
    }
}

/// Summary of a finished job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    /// Board width and height
    pub board_size: usize,

    /// Ranks used
    pub procs: usize,

    /// Generation count and stop reason
    #[serde(flatten)]
    pub summary: RunSummary,

    /// Wall-clock time of the generation loop at the root
    pub elapsed_ms: u64,

    /// Live cells on the final board
    pub population: usize,

    /// How the first generation was produced
    pub seed_strategy: SeedStrategy,

    /// Row band of every rank
    pub partitions: Vec<Partition>,

    /// Final board file
    pub output_file: PathBuf,

    /// Result of the sequential cross-check, if one was run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl JobReport {
    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halolife_env::Rank;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("halolife-{name}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn test_file_name_embeds_procs_and_generation() {
        assert_eq!(
            BoardExporter::file_name(100, 4, 37),
            "final_board_100_procs_4_gen_37.txt"
        );
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = scratch_dir("write").join("nested");
        let exporter = BoardExporter::new(&dir);

        let mut grid = Grid::new(3);
        grid.set(1, 0, true);
        grid.set(1, 2, true);

        let path = exporter.write(&grid, 2, 5).unwrap();

        assert!(dir.is_dir());
        assert_eq!(path, dir.join("final_board_3_procs_2_gen_5.txt"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            ". . .\n* . *\n. . .\n"
        );

        std::fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_uncreatable_directory_writes_nothing() {
        // a regular file where the directory should go
        let blocker = scratch_dir("blocked");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let exporter = BoardExporter::new(blocker.join("out"));
        let result = exporter.write(&Grid::new(2), 1, 1);

        assert!(matches!(result, Err(ExportError::CreateDir { .. })));
        assert!(!blocker.join("out").exists());

        std::fs::remove_file(&blocker).unwrap();
    }

    #[test]
    fn test_report_json() {
        let report = JobReport {
            board_size: 4,
            procs: 2,
            summary: RunSummary {
                generations: 3,
                converged: true,
            },
            elapsed_ms: 12,
            population: 4,
            seed_strategy: SeedStrategy::PerRank { base: 12345 },
            partitions: Partition::all(4, 2).unwrap(),
            output_file: PathBuf::from("out/final_board_4_procs_2_gen_3.txt"),
            verified: None,
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["generations"], 3);
        assert_eq!(json["converged"], true);
        assert_eq!(json["seed_strategy"]["kind"], "per_rank");
        assert_eq!(json["partitions"][1]["row_offset"], 2);
        assert_eq!(json["partitions"][1]["rank"], Rank(1).index());
        assert!(json.get("verified").is_none());
    }
}

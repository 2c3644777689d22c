/// Relocation of flagged images into BLACK / WHITE folders
///
/// Folders are created next to the scanned files. Each move is attempted
/// independently; one failure is recorded and the rest still run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Result;
use crate::state::{Classification, RunSummary};

pub const BLACK_FOLDER: &str = "BLACK";
pub const WHITE_FOLDER: &str = "WHITE";

/// Which flagged buckets to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    BlackOnly,
    WhiteOnly,
    All,
    None,
}

impl MoveChoice {
    pub fn includes(&self, kind: Classification) -> bool {
        match (self, kind) {
            (MoveChoice::All, Classification::Black | Classification::White) => true,
            (MoveChoice::BlackOnly, Classification::Black) => true,
            (MoveChoice::WhiteOnly, Classification::White) => true,
            _ => false,
        }
    }
}

impl FromStr for MoveChoice {
    type Err = std::convert::Infallible;

    /// `b`, `w`, `a` pick buckets; anything else moves nothing
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "b" | "black" => MoveChoice::BlackOnly,
            "w" | "white" => MoveChoice::WhiteOnly,
            "a" | "all" => MoveChoice::All,
            _ => MoveChoice::None,
        })
    }
}

/// Outcome of moving one bucket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveReport {
    pub folder: PathBuf,
    pub moved: Vec<String>,
    /// (filename, error message)
    pub failed: Vec<(String, String)>,
}

impl MoveReport {
    pub fn attempted(&self) -> usize {
        self.moved.len() + self.failed.len()
    }
}

/// Create `dir/name` if it does not exist yet
pub fn create_folder(dir: &Path, name: &str) -> Result<PathBuf> {
    let folder = dir.join(name);
    if !folder.is_dir() {
        fs::create_dir_all(&folder)?;
        println!("📁 Created {} folder: {}", name, folder.display());
    }
    Ok(folder)
}

/// Rename, falling back to copy + delete when the rename cannot cross filesystems
fn move_file(source: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !source.is_file() {
                return Err(rename_err);
            }
            fs::copy(source, dest).map_err(|_| rename_err)?;
            fs::remove_file(source)
        }
    }
}

/// Move `files` from `source_dir` into `dest_folder`, keeping their names
pub fn move_images(files: &[String], source_dir: &Path, dest_folder: &Path) -> MoveReport {
    let folder_name = dest_folder
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let mut report = MoveReport {
        folder: dest_folder.to_path_buf(),
        ..MoveReport::default()
    };

    for filename in files {
        let source = source_dir.join(filename);
        let dest = dest_folder.join(filename);

        match move_file(&source, &dest) {
            Ok(()) => {
                println!("MOVED: {} -> {}/", filename, folder_name);
                report.moved.push(filename.clone());
            }
            Err(e) => {
                eprintln!("⚠️  Failed to move {}: {}", filename, e);
                tracing::warn!(file = %filename, "move to {} failed: {}", dest_folder.display(), e);
                report.failed.push((filename.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Results of a relocation pass, one entry per bucket that was moved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relocation {
    pub black: Option<MoveReport>,
    pub white: Option<MoveReport>,
}

/// Move the flagged files of a finished run according to `choice`
pub fn relocate(summary: &RunSummary, dir: &Path, choice: MoveChoice) -> Result<Relocation> {
    let mut relocation = Relocation::default();

    if choice.includes(Classification::Black) && !summary.black_files.is_empty() {
        let folder = create_folder(dir, BLACK_FOLDER)?;
        let report = move_images(&summary.black_files, dir, &folder);
        println!(
            "\n📁 Moved {}/{} black images to: {}",
            report.moved.len(),
            summary.black_files.len(),
            folder.display()
        );
        relocation.black = Some(report);
    }

    if choice.includes(Classification::White) && !summary.white_files.is_empty() {
        let folder = create_folder(dir, WHITE_FOLDER)?;
        let report = move_images(&summary.white_files, dir, &folder);
        println!(
            "📁 Moved {}/{} white images to: {}",
            report.moved.len(),
            summary.white_files.len(),
            folder.display()
        );
        relocation.white = Some(report);
    }

    Ok(relocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!("b".parse::<MoveChoice>().unwrap(), MoveChoice::BlackOnly);
        assert_eq!(" W ".parse::<MoveChoice>().unwrap(), MoveChoice::WhiteOnly);
        assert_eq!("a".parse::<MoveChoice>().unwrap(), MoveChoice::All);
        assert_eq!("n".parse::<MoveChoice>().unwrap(), MoveChoice::None);
        assert_eq!("whatever".parse::<MoveChoice>().unwrap(), MoveChoice::None);
        assert_eq!("".parse::<MoveChoice>().unwrap(), MoveChoice::None);
    }

    #[test]
    fn test_choice_includes() {
        assert!(MoveChoice::All.includes(Classification::Black));
        assert!(MoveChoice::All.includes(Classification::White));
        assert!(!MoveChoice::All.includes(Classification::Normal));
        assert!(MoveChoice::BlackOnly.includes(Classification::Black));
        assert!(!MoveChoice::BlackOnly.includes(Classification::White));
        assert!(!MoveChoice::None.includes(Classification::Black));
    }

    #[test]
    fn test_create_folder_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = create_folder(dir.path(), BLACK_FOLDER).unwrap();
        let second = create_folder(dir.path(), BLACK_FOLDER).unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_failed_move_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.jpg"), b"1").unwrap();
        fs::write(dir.path().join("three.jpg"), b"3").unwrap();
        let folder = create_folder(dir.path(), WHITE_FOLDER).unwrap();

        let files = vec![
            "one.jpg".to_string(),
            "missing.jpg".to_string(),
            "three.jpg".to_string(),
        ];
        let report = move_images(&files, dir.path(), &folder);

        assert_eq!(report.moved, vec!["one.jpg", "three.jpg"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "missing.jpg");
        assert_eq!(report.attempted(), 3);
        assert!(folder.join("one.jpg").exists());
        assert!(folder.join("three.jpg").exists());
        assert!(!dir.path().join("one.jpg").exists());
    }

    #[test]
    fn test_relocate_respects_choice() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join("b.jpg"), b"b").unwrap();

        let summary = RunSummary {
            black_files: vec!["a.jpg".to_string()],
            white_files: vec!["b.jpg".to_string()],
            ..RunSummary::default()
        };

        let relocation = relocate(&summary, dir.path(), MoveChoice::WhiteOnly).unwrap();
        assert!(relocation.black.is_none());
        assert_eq!(relocation.white.unwrap().moved, vec!["b.jpg"]);

        assert!(dir.path().join("a.jpg").exists());
        assert!(!dir.path().join(BLACK_FOLDER).exists());
        assert!(dir.path().join(WHITE_FOLDER).join("b.jpg").exists());
    }
}

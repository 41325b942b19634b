//! File I/O for saving and replaying move sequences.
//!
//! Text format of `scramble.txt`:
//! - `# moves` header, then the whole sequence in notation on one line
//! - `# layout` header, then the cube layout produced by the sequence
//!   (informational; ignored when loading)

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::cube::Cube;
use crate::grid::format_cube;
use crate::scramble::Scramble;

/// Default file used by the CLI.
pub const SCRAMBLE_TXT: &str = "scramble.txt";

const MOVES_HEADER: &str = "# moves";
const LAYOUT_HEADER: &str = "# layout";

/// Saves a sequence together with the layout it produced.
pub fn save(path: &Path, scramble: &Scramble, cube: &Cube) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{MOVES_HEADER}")?;
    writeln!(file, "{scramble}")?;
    writeln!(file, "{LAYOUT_HEADER}")?;
    write!(file, "{}", format_cube(cube))?;
    Ok(())
}

/// Loads the move sequence from a saved file.
pub fn load(path: &Path) -> std::io::Result<Scramble> {
    let reader = BufReader::new(File::open(path)?);
    let mut in_moves = false;
    let mut notation = String::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        match trimmed {
            MOVES_HEADER => in_moves = true,
            LAYOUT_HEADER => break,
            _ if in_moves => notation.push_str(trimmed),
            _ => {}
        }
    }

    if !in_moves {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} has no '{MOVES_HEADER}' section", path.display()),
        ));
    }

    Scramble::parse(&notation)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FaceTurnAnimator;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cubeturn-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_save_then_load_sequence() {
        let path = temp_path("roundtrip.txt");
        let scramble = Scramble::parse("L'R'UDFBL'R'").unwrap();
        let animator = FaceTurnAnimator::default();

        save(&path, &scramble, animator.cube()).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, scramble);
    }

    #[test]
    fn test_load_rejects_missing_section() {
        let path = temp_path("missing.txt");
        std::fs::write(&path, "LRU\n").unwrap();
        let result = load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_rejects_bad_notation() {
        let path = temp_path("bad.txt");
        std::fs::write(&path, "# moves\nLQ\n").unwrap();
        let result = load(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}

//! File I/O for caching discovered generator tables.
//!
//! Binary format for `generators_<N>.bin` (little endian):
//! - u32: cube size
//! - u32: domain size (facelets per permutation)
//! - u32: generator count
//! - repeat per generator:
//!   - u8: face symbol (ASCII)
//!   - i32: quarter turns
//!   - repeat `domain` times: u32 image (1-based)
//!
//! A `generators_<N>.txt` listing in cycle notation is written alongside.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::facelets::FaceletSpace;
use crate::generators::{Generator, GeneratorTable};
use crate::moves::{Face, Turn};
use crate::permutation::Permutation;

fn binary_path(directory: &Path, size: usize) -> PathBuf {
    directory.join(format!("generators_{size}.bin"))
}

fn text_path(directory: &Path, size: usize) -> PathBuf {
    directory.join(format!("generators_{size}.txt"))
}

/// Saves a table to both binary and text files.
pub fn save(directory: &Path, size: usize, table: &GeneratorTable) -> std::io::Result<()> {
    save_text(directory, size, table)?;
    save_binary(directory, size, table)?;
    Ok(())
}

/// Saves the human-readable listing.
fn save_text(directory: &Path, size: usize, table: &GeneratorTable) -> std::io::Result<()> {
    let mut file = File::create(text_path(directory, size))?;
    writeln!(file, "{} generators for {size}x{size}x{size}:\n", table.len())?;
    write!(file, "{}", table.listing(&FaceletSpace::new(size)))?;
    Ok(())
}

/// Saves the compact binary form used for loading.
fn save_binary(directory: &Path, size: usize, table: &GeneratorTable) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(binary_path(directory, size))?);

    file.write_all(&(size as u32).to_le_bytes())?;
    file.write_all(&(table.domain() as u32).to_le_bytes())?;
    file.write_all(&(table.len() as u32).to_le_bytes())?;

    for generator in table.generators() {
        file.write_all(&[generator.turn.face.symbol() as u8])?;
        file.write_all(&generator.turn.quarters.to_le_bytes())?;
        for &image in generator.permutation.images() {
            file.write_all(&(image as u32).to_le_bytes())?;
        }
    }

    file.flush()
}

fn read_u32(reader: &mut impl Read) -> Option<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer).ok()?;
    Some(u32::from_le_bytes(buffer))
}

/// Loads the table cached for `size`.
///
/// A missing, truncated or inconsistent file reads as `None`.
pub fn load(directory: &Path, size: usize) -> Option<GeneratorTable> {
    let mut file = BufReader::new(File::open(binary_path(directory, size)).ok()?);

    if read_u32(&mut file)? as usize != size {
        return None;
    }
    let domain = read_u32(&mut file)? as usize;
    if domain != FaceletSpace::new(size).facelet_count() {
        return None;
    }
    // `count` comes from the file, so records are pushed as they are read
    let count = read_u32(&mut file)?;

    let mut generators = Vec::new();
    for _ in 0..count {
        let mut symbol = [0u8; 1];
        file.read_exact(&mut symbol).ok()?;
        let face = Face::from_symbol(char::from(symbol[0]))?;

        let mut quarters = [0u8; 4];
        file.read_exact(&mut quarters).ok()?;
        let quarters = i32::from_le_bytes(quarters);

        let images = (0..domain)
            .map(|_| read_u32(&mut file).map(|image| image as usize))
            .collect::<Option<Vec<_>>>()?;
        generators.push(Generator {
            turn: Turn::new(face, quarters),
            permutation: Permutation::new(images).ok()?,
        });
    }

    GeneratorTable::new(generators).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::edge_corner_table;

    fn scratch_directory(name: &str) -> PathBuf {
        let directory =
            std::env::temp_dir().join(format!("magicube-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        directory
    }

    #[test]
    fn test_save_then_load() {
        let directory = scratch_directory("save-load");
        let table = edge_corner_table();
        save(&directory, 2, &table).unwrap();

        assert_eq!(load(&directory, 2), Some(table));
        let listing = std::fs::read_to_string(text_path(&directory, 2)).unwrap();
        assert!(listing.starts_with("11 generators for 2x2x2:\n\n"));
        assert_eq!(listing.lines().count(), 13);

        std::fs::remove_dir_all(&directory).unwrap();
    }

    fn write_header(directory: &Path, size: usize, header: [u32; 3]) {
        let bytes: Vec<u8> = header.iter().flat_map(|value| value.to_le_bytes()).collect();
        std::fs::write(binary_path(directory, size), bytes).unwrap();
    }

    #[test]
    fn test_oversized_header_is_none() {
        let directory = scratch_directory("oversized");

        write_header(&directory, 2, [2, 24, u32::MAX]);
        assert_eq!(load(&directory, 2), None);

        write_header(&directory, 2, [2, u32::MAX, 1]);
        assert_eq!(load(&directory, 2), None);

        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn test_missing_file_is_none() {
        let directory = scratch_directory("missing");
        assert_eq!(load(&directory, 5), None);
        std::fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn test_truncated_or_corrupt_file_is_none() {
        let directory = scratch_directory("corrupt");
        save(&directory, 2, &edge_corner_table()).unwrap();

        let path = binary_path(&directory, 2);
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
        assert_eq!(load(&directory, 2), None);

        // duplicate an image so the first generator is no longer a bijection
        let mut corrupt = bytes.clone();
        let first_image = 12 + 1 + 4;
        corrupt.copy_within(first_image..first_image + 4, first_image + 4);
        std::fs::write(&path, &corrupt).unwrap();
        assert_eq!(load(&directory, 2), None);

        // a file saved for one size is not accepted for another
        std::fs::write(binary_path(&directory, 3), &bytes).unwrap();
        assert_eq!(load(&directory, 3), None);

        std::fs::remove_dir_all(&directory).unwrap();
    }
}

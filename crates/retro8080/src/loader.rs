use std::path::Path;

use anyhow::{bail, Context, Result};
use retro8080_cpu::MEMORY_SIZE;

/// Read a program image from disk.
pub fn load_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let image =
        std::fs::read(path).with_context(|| format!("failed to read image '{}'", path.display()))?;
    log::info!("Read {} bytes from '{}'", image.len(), path.display());
    Ok(image)
}

/// Reject images that would wrap past the top of memory when placed at
/// `load_address`.
pub fn check_image(image: &[u8], load_address: u16) -> Result<()> {
    if image.is_empty() {
        bail!("image is empty");
    }

    let room = MEMORY_SIZE - load_address as usize;
    if image.len() > room {
        bail!(
            "image of {} bytes does not fit at {:04X} ({} bytes available)",
            image.len(),
            load_address,
            room
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_that_fills_memory() {
        assert!(check_image(&[0; 0x100], 0xFF00).is_ok());
        assert!(check_image(&vec![0; MEMORY_SIZE], 0x0000).is_ok());
    }

    #[test]
    fn rejects_empty_image() {
        assert!(check_image(&[], 0x0000).is_err());
    }

    #[test]
    fn rejects_oversized_image() {
        let err = check_image(&[0; 0x101], 0xFF00).unwrap_err();
        assert!(err.to_string().contains("does not fit at FF00"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("retro8080-missing-image.bin");
        let err = load_image(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("retro8080-missing-image.bin"));
    }
}

use std::{error::Error, fs, process::Command};

use darkroom_raster::RasterImage;

fn darkroom() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_darkroom"));
    cmd.env_remove("DARKROOM_WORKERS");
    cmd
}

#[test]
fn missing_argument_exits_one_with_help() -> Result<(), Box<dyn Error>> {
    let output = darkroom().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
    Ok(())
}

#[test]
fn missing_input_exits_one_without_output() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("absent.png");

    let output = darkroom().arg(&input).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to process"));
    assert!(!dir.path().join("absent_inverted.png").exists());
    Ok(())
}

#[test]
fn garbage_input_exits_one_without_output() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("junk.png");
    fs::write(&input, b"not an image at all")?;

    let output = darkroom().arg(&input).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("junk_inverted.png").exists());
    Ok(())
}

#[test]
fn inverts_an_image_end_to_end() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("frame.png");
    let pixels = vec![10, 20, 30, 200, 210, 220, 0, 0, 0, 255, 255, 255];
    RasterImage::from_raw(2, 2, 3, pixels)?.save_png(&input)?;

    let output = darkroom().arg(&input).output()?;
    assert_eq!(output.status.code(), Some(0));

    let inverted = RasterImage::open(dir.path().join("frame_inverted.png"))?;
    assert_eq!(inverted.width(), 2);
    assert_eq!(inverted.height(), 2);
    assert_eq!(inverted.channels(), 3);
    assert_eq!(
        inverted.as_bytes(),
        &[245, 235, 225, 55, 45, 35, 255, 255, 255, 0, 0, 0]
    );
    Ok(())
}

use std::fs;
use std::path::Path;

use bmpfilter::cli::{parse_args, run, CliError};
use bmpfilter::{Bitmap, Color, Filter, PixelGrid};

fn write_bmp(path: &Path, grid: PixelGrid) -> Vec<u8> {
    let bytes = Bitmap::from_grid(grid).unwrap().encode();
    fs::write(path, &bytes).unwrap();
    bytes
}

fn run_args(args: &[&str]) -> Result<(), CliError> {
    let invocation = parse_args(std::iter::once("filter").chain(args.iter().copied()))?;
    run(&invocation)
}

#[test]
fn load_then_store_reproduces_file() {
    // widths 1..=5 cover every padding length
    for width in 1..=5 {
        let grid = PixelGrid::from_fn(3, width, |y, x| Color::new(x as u8 * 40, y as u8 * 70, 9));
        let bytes = Bitmap::from_grid(grid).unwrap().encode();
        let decoded = Bitmap::decode(&bytes).unwrap();
        assert_eq!(decoded.encode(), bytes, "width {width}");
    }
}

#[test]
fn reflect_row_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let original = write_bmp(
        &input,
        PixelGrid::from_rows(vec![vec![Color::RED, Color::GREEN, Color::BLUE]]).unwrap(),
    );

    run_args(&["-r", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap();

    let written = fs::read(&output).unwrap();
    assert_eq!(written.len(), original.len());
    assert_eq!(&written[..54], &original[..54]);
    let bitmap = Bitmap::decode(&written).unwrap();
    assert_eq!(bitmap.grid().row(0), vec![Color::BLUE, Color::GREEN, Color::RED]);
}

#[test]
fn every_filter_end_to_end_with_threads() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let grid = PixelGrid::from_fn(7, 6, |y, x| Color::new((x * 41) as u8, (y * 37) as u8, ((x * y) % 256) as u8));
    write_bmp(&input, grid.clone());

    for filter in Filter::ALL {
        let output = dir.path().join(format!("{filter}.bmp"));
        let flag = format!("--{}", filter.name());
        run_args(&[flag.as_str(), "--threads", "2", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap();

        let mut expected = grid.clone();
        filter.apply(&mut expected);
        let written = Bitmap::decode(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(written.grid(), &expected, "{filter}");
    }
}

#[test]
fn unsupported_format_exit_6() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.bmp");
    fs::write(&input, b"\x89PNG\r\n\x1a\nnot a bitmap at all, padded out past fifty-four bytes....").unwrap();

    let err = run_args(&["-g", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, CliError::UnsupportedFormat(_)));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn truncated_file_exit_6() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    let bytes = write_bmp(&input, PixelGrid::new(4, 4, Color::WHITE));
    fs::write(&input, &bytes[..bytes.len() - 5]).unwrap();

    let err = run_args(&["-b", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn uncreatable_output_exit_5() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bmp");
    write_bmp(&input, PixelGrid::new(2, 2, Color::WHITE));
    let output = dir.path().join("no-such-dir").join("out.bmp");

    let err = run_args(&["-e", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, CliError::CreateOutput { .. }));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn missing_input_exit_4() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.bmp");
    let output = dir.path().join("out.bmp");

    let err = run_args(&["-b", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert_eq!(err.exit_code(), 4);
    assert!(!output.exists());
}

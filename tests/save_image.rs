use std::fs;
use std::path::PathBuf;
use std::process;

use rand::Rng;
use rgb_raster::{PpmEncoding, RasterError, RasterImage, Rgb, SaveOptions};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A path in the temp directory that is removed when dropped
struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str) -> TempFile {
        TempFile(std::env::temp_dir().join(format!("rgb-raster-{}-{}.ppm", process::id(), name)))
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn two_by_two() -> RasterImage {
    let mut img = RasterImage::create(2, 2).unwrap();
    img.set_pixel(0, 0, 10, 20, 30).unwrap();
    img.set_pixel(1, 0, 40, 50, 60).unwrap();
    img.set_pixel(0, 1, 70, 80, 90).unwrap();
    img.set_pixel(1, 1, 100, 110, 120).unwrap();
    img
}

#[test]
fn saves_two_by_two_image_in_legacy_layout() {
    init_logger();
    let file = TempFile::new("legacy");

    two_by_two().save_image(&file.0).unwrap();
    let contents = fs::read_to_string(&file.0).unwrap();

    assert!(contents.starts_with("P6\n2 2\n255\n"));
    assert_eq!(contents, "P6\n2 2\n255\n10 20 30 40 50 60 \n70 80 90 100 110 120 \n");
}

#[test]
fn save_truncates_existing_file() {
    init_logger();
    let file = TempFile::new("truncate");
    fs::write(&file.0, vec![b'x'; 4096]).unwrap();

    let options = SaveOptions::new(PpmEncoding::Binary);
    two_by_two().save_image_with(&file.0, &options).unwrap();
    let contents = fs::read(&file.0).unwrap();

    assert_eq!(contents.len(), "P6\n2 2\n255\n".len() + 12);
    assert_eq!(&contents[contents.len() - 3..], &[100, 110, 120]);
}

#[test]
fn save_into_missing_directory_reports_io_error() {
    init_logger();
    let path = std::env::temp_dir()
        .join(format!("rgb-raster-missing-{}", process::id()))
        .join("out.ppm");

    let err = two_by_two().save_image(&path).unwrap_err();
    assert!(matches!(err, RasterError::Io(_)));
}

#[test]
fn random_pixels_round_trip() {
    init_logger();
    let mut rng = rand::thread_rng();
    let (w, h) = (37, 23);
    let mut img = RasterImage::create(w, h).unwrap();
    let mut expected = vec![Rgb::black(); w * h];

    for _ in 0..2000 {
        let (x, y) = (rng.gen_range(0, w), rng.gen_range(0, h));
        let (r, g, b): (u8, u8, u8) = rng.gen();
        img.set_pixel(x, y, r, g, b).unwrap();
        expected[y * w + x] = Rgb::new(r, g, b);

        assert_eq!(img.get_red_pixel(x, y).unwrap(), r);
        assert_eq!(img.get_green_pixel(x, y).unwrap(), g);
        assert_eq!(img.get_blue_pixel(x, y).unwrap(), b);
    }

    assert!(img.pixels().eq(expected.into_iter()));
}

#[test]
fn copies_own_their_memory() {
    init_logger();
    let sq100 = RasterImage::filled(100, 100, Rgb::new(100, 200, 50)).unwrap();
    let mut sq2 = sq100.clone();
    let mut sq3 = RasterImage::create(50, 50).unwrap();
    sq3.clone_from(&sq2);

    assert_eq!((sq3.width(), sq3.height()), (100, 100));

    sq2.set_pixel(10, 10, 0, 0, 0).unwrap();
    sq3.set_pixel(20, 20, 1, 1, 1).unwrap();

    assert_eq!(sq100.get_pixel(10, 10).unwrap(), Rgb::new(100, 200, 50));
    assert_eq!(sq100.get_pixel(20, 20).unwrap(), Rgb::new(100, 200, 50));
    assert_eq!(sq3.get_pixel(10, 10).unwrap(), Rgb::new(100, 200, 50));
    assert_eq!(sq2.get_pixel(20, 20).unwrap(), Rgb::new(100, 200, 50));
}

#[test]
fn oversized_create_fails_cleanly() {
    init_logger();
    assert!(matches!(
        RasterImage::create(usize::MAX, usize::MAX),
        Err(RasterError::AllocationFailed { .. })
    ));
}

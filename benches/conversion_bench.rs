use convrt::processing::{load_image, process_file, resize_image};
use convrt::{codec_for_extension, ConversionOptions, EncodeSettings};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::PathBuf;
use tempfile::TempDir;

fn gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn create_test_image(width: u32, height: u32, format: ImageFormat) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let extension = format.extensions_str()[0];
    let test_file = temp_dir.path().join(format!("test.{}", extension));
    gradient_image(width, height)
        .save_with_format(&test_file, format)
        .unwrap();
    (test_file, temp_dir)
}

fn bench_options_creation(c: &mut Criterion) {
    c.bench_function("options_creation", |b| {
        b.iter(|| {
            ConversionOptions::new(
                black_box(250),
                black_box(false),
                black_box(800),
                black_box(-1),
                false,
                Some(".webp".to_string()),
            )
        })
    });
}

fn bench_image_loading(c: &mut Criterion) {
    let (test_file, _temp_dir) = create_test_image(1920, 1080, ImageFormat::Jpeg);

    c.bench_function("image_loading", |b| {
        b.iter(|| load_image(black_box(&test_file)))
    });
}

fn bench_image_resizing(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_resizing");

    for (width, height) in [(800, 600), (1920, 1080)] {
        let img = gradient_image(width, height);
        group.bench_with_input(
            BenchmarkId::new("lanczos3", format!("{}x{}", width, height)),
            &img,
            |b, img| b.iter(|| resize_image(black_box(img.clone()), width / 2, 0)),
        );
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let img = gradient_image(640, 480);
    let settings = EncodeSettings {
        quality: 80,
        optimize: false,
    };

    for extension in ["jpg", "png", "gif", "tiff", "webp"] {
        let Some(codec) = codec_for_extension(extension) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("encode", extension), &img, |b, img| {
            b.iter(|| codec.encode(black_box(img), black_box(&settings)))
        });
    }

    group.finish();
}

fn bench_file_conversion(c: &mut Criterion) {
    let (test_file, _temp_dir) = create_test_image(1280, 720, ImageFormat::Png);
    let options = ConversionOptions {
        target_extension: Some(".jpg".to_string()),
        ..ConversionOptions::default()
    };

    c.bench_function("png_to_jpg", |b| {
        b.iter(|| process_file(black_box(&test_file), black_box(&options)))
    });
}

criterion_group!(
    benches,
    bench_options_creation,
    bench_image_loading,
    bench_image_resizing,
    bench_encoding,
    bench_file_conversion
);
criterion_main!(benches);

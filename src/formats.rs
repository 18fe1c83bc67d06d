//! Codec table and encoders.
//!
//! Every format convrt knows about is one row of [`CODECS`]: the extensions
//! that select it, the `image` crate format it is detected as, whether it can
//! be decoded, and the encoder used to write it. Supporting a new format is a
//! matter of adding a row.

use crate::constants::{LIBDEFLATER_HIGH_LEVEL, OXIPNG_PRESET};
use crate::error::{ConvertError, Result};
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, Frame, ImageFormat};
use oxipng::Deflaters;
use std::fmt;
use std::io::Cursor;
use tiff::encoder::{colortype, compression::Deflate, TiffEncoder};

/// Formats listed in the codec table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    WebP,
    Bmp,
}

impl fmt::Display for CodecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecFormat::Jpeg => "JPEG",
            CodecFormat::Png => "PNG",
            CodecFormat::Gif => "GIF",
            CodecFormat::Tiff => "TIFF",
            CodecFormat::WebP => "WebP",
            CodecFormat::Bmp => "BMP",
        };
        write!(f, "{}", name)
    }
}

/// Parameters handed to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    /// Quality for lossy codecs (1-100); lossless codecs ignore it
    pub quality: u8,
    /// Run the extra lossless optimization pass where a codec has one
    pub optimize: bool,
}

pub type EncodeFn = fn(&DynamicImage, &EncodeSettings) -> Result<Vec<u8>>;

pub struct Codec {
    pub format: CodecFormat,
    pub extensions: &'static [&'static str],
    pub image_format: ImageFormat,
    pub decode: bool,
    pub encode: Option<EncodeFn>,
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("format", &self.format)
            .field("extensions", &self.extensions)
            .field("decode", &self.decode)
            .field("encode", &self.encode.is_some())
            .finish()
    }
}

pub static CODECS: &[Codec] = &[
    Codec {
        format: CodecFormat::Jpeg,
        extensions: &["jpg", "jpeg"],
        image_format: ImageFormat::Jpeg,
        decode: true,
        encode: Some(encode_jpeg),
    },
    Codec {
        format: CodecFormat::Png,
        extensions: &["png"],
        image_format: ImageFormat::Png,
        decode: true,
        encode: Some(encode_png),
    },
    Codec {
        format: CodecFormat::Gif,
        extensions: &["gif"],
        image_format: ImageFormat::Gif,
        decode: true,
        encode: Some(encode_gif),
    },
    Codec {
        format: CodecFormat::Tiff,
        extensions: &["tiff"],
        image_format: ImageFormat::Tiff,
        decode: true,
        encode: Some(encode_tiff),
    },
    Codec {
        format: CodecFormat::WebP,
        extensions: &["webp"],
        image_format: ImageFormat::WebP,
        decode: true,
        encode: Some(encode_webp),
    },
    Codec {
        format: CodecFormat::Bmp,
        extensions: &["bmp"],
        image_format: ImageFormat::Bmp,
        decode: true,
        encode: None,
    },
];

impl Codec {
    pub fn can_encode(&self) -> bool {
        self.encode.is_some()
    }

    pub fn encode(&self, img: &DynamicImage, settings: &EncodeSettings) -> Result<Vec<u8>> {
        let encode = self
            .encode
            .ok_or_else(|| ConvertError::unsupported(self.extensions[0]))?;
        encode(img, settings)
    }
}

/// Looks a codec up by file extension. A leading dot is accepted and case is
/// ignored.
pub fn codec_for_extension(extension: &str) -> Option<&'static Codec> {
    let extension = extension.strip_prefix('.').unwrap_or(extension).to_lowercase();
    CODECS
        .iter()
        .find(|codec| codec.extensions.contains(&extension.as_str()))
}

pub fn codec_for_image_format(format: ImageFormat) -> Option<&'static Codec> {
    CODECS.iter().find(|codec| codec.image_format == format)
}

/// Codec able to write files with the given extension.
pub fn encoder_for_extension(extension: &str) -> Result<&'static Codec> {
    codec_for_extension(extension)
        .filter(|codec| codec.can_encode())
        .ok_or_else(|| ConvertError::unsupported(extension.strip_prefix('.').unwrap_or(extension)))
}

/// Codec able to re-encode an image that was decoded as `format`.
pub fn encoder_for_image_format(format: ImageFormat) -> Result<&'static Codec> {
    codec_for_image_format(format)
        .filter(|codec| codec.can_encode())
        .ok_or_else(|| {
            let name = format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("unknown");
            ConvertError::unsupported(name)
        })
}

/// Extensions that can be used as a conversion target, in table order.
pub fn supported_extensions() -> Vec<&'static str> {
    CODECS
        .iter()
        .filter(|codec| codec.can_encode())
        .flat_map(|codec| codec.extensions.iter().copied())
        .collect()
}

fn encode_jpeg(img: &DynamicImage, settings: &EncodeSettings) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, settings.quality))?;
    Ok(buf)
}

fn encode_png(img: &DynamicImage, settings: &EncodeSettings) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_with_encoder(PngEncoder::new(&mut buf))?;

    if settings.optimize {
        let mut options = oxipng::Options::from_preset(OXIPNG_PRESET);
        options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        };
        buf = oxipng::optimize_from_memory(&buf, &options)
            .map_err(|e| ConvertError::PngOptimization(e.to_string()))?;
    }

    Ok(buf)
}

fn encode_gif(img: &DynamicImage, _settings: &EncodeSettings) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        // The trailer is written when the encoder is dropped
        let mut encoder = GifEncoder::new(&mut buf);
        encoder.encode_frame(Frame::new(img.to_rgba8()))?;
    }
    Ok(buf)
}

fn encode_tiff(img: &DynamicImage, _settings: &EncodeSettings) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut cursor)?;
        let (width, height) = (img.width(), img.height());
        if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            encoder.write_image_with_compression::<colortype::RGBA8, _>(
                width,
                height,
                Deflate::default(),
                rgba.as_raw(),
            )?;
        } else {
            let rgb = img.to_rgb8();
            encoder.write_image_with_compression::<colortype::RGB8, _>(
                width,
                height,
                Deflate::default(),
                rgb.as_raw(),
            )?;
        }
    }
    Ok(cursor.into_inner())
}

fn encode_webp(img: &DynamicImage, settings: &EncodeSettings) -> Result<Vec<u8>> {
    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let memory = encoder
        .encode_simple(false, f32::from(settings.quality))
        .map_err(|e| ConvertError::WebpEncode(format!("{:?}", e)))?;
    Ok(memory.to_vec())
}
